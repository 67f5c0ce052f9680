use thiserror::Error;

/// Errors raised while setting up color ramps and histograms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The configuration cannot produce a meaningful ramp or
    /// histogram (no control points, too few samples, duplicate
    /// keys, empty bin range,...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown road zone: {0}")]
    UnknownZone(String),
}

pub type Result<T> = std::result::Result<T, Error>;
