//! Helpers for the road information panel.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{palettes, to_fixed, Error, ResampledRamp};

/// Kind of area a road goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Urban,
    Rural,
    Motorway,
}

impl Zone {
    /// Distance palette for roads of this zone.  Motorways have no
    /// palette of their own and use the urban one.
    pub fn palette(self) -> &'static ResampledRamp {
        match self {
            Zone::Rural => palettes::rural(),
            Zone::Urban | Zone::Motorway => palettes::urban(),
        }
    }

    /// Name of the label color of the zone.
    pub fn label_color(self) -> &'static str {
        match self {
            Zone::Urban => "olive",
            Zone::Rural => "brown",
            Zone::Motorway => "purple",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Urban => "urban",
            Zone::Rural => "rural",
            Zone::Motorway => "motorway",
        }
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urban" => Ok(Zone::Urban),
            "rural" => Ok(Zone::Rural),
            "motorway" => Ok(Zone::Motorway),
            _ => Err(Error::UnknownZone(s.to_string())),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette for a road whose zone may be unknown (or not recognized),
/// defaulting to the urban palette.
pub fn zone_palette(zone: Option<&str>) -> &'static ResampledRamp {
    zone.and_then(|z| z.parse::<Zone>().ok())
        .map_or_else(palettes::urban, Zone::palette)
}

const CARDINAL_DIRECTIONS: [&str; 8] = [
    "north", "north-east", "east", "south-east",
    "south", "south-west", "west", "north-west"];

/// Direction of travel for a `bearing` in degrees clockwise from
/// north, e.g. `"south-east bound"`, or `"unknown"`.
///
/// ```
/// use overtaking_colors::road::cardinal_direction;
/// assert_eq!(cardinal_direction(Some(350.)), "north bound");
/// assert_eq!(cardinal_direction(Some(100.)), "east bound");
/// assert_eq!(cardinal_direction(None), "unknown");
/// ```
pub fn cardinal_direction(bearing: Option<f64>) -> String {
    match bearing {
        Some(b) if b.is_finite() => {
            let n = CARDINAL_DIRECTIONS.len() as f64;
            let i = (b / 360. * n + 0.5).rem_euclid(n).floor() as usize;
            // rem_euclid may round up to `n` for tiny negative values.
            let i = i % CARDINAL_DIRECTIONS.len();
            format!("{} bound", CARDINAL_DIRECTIONS[i])
        }
        _ => "unknown".to_string(),
    }
}

/// Measured property of a road.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    DistanceOvertaker,
    DistanceStationary,
    Speed,
}

impl Property {
    pub const ALL: [Property; 3] =
        [Property::DistanceOvertaker, Property::DistanceStationary,
         Property::Speed];

    pub fn label(self) -> &'static str {
        match self {
            Property::DistanceOvertaker => "Overtaker",
            Property::DistanceStationary => "Stationary",
            Property::Speed => "Speed",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Property::DistanceOvertaker | Property::DistanceStationary => "m",
            Property::Speed => "m/s",
        }
    }
}

/// Summary statistic of a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Statistic {
    Count,
    Min,
    Median,
    Max,
    Mean,
}

impl Statistic {
    pub const ALL: [Statistic; 5] =
        [Statistic::Count, Statistic::Min, Statistic::Median,
         Statistic::Max, Statistic::Mean];

    /// Column header in the statistics table.
    pub fn header(self) -> &'static str {
        match self {
            Statistic::Count => "n",
            Statistic::Min => "min",
            Statistic::Median => "q50",
            Statistic::Max => "max",
            Statistic::Mean => "mean",
        }
    }
}

/// Table cell for `value`: counts without decimals, other statistics
/// with 3 decimals, and an empty cell for missing values.  Halfway
/// values are rounded away from zero.
pub fn format_statistic(stat: Statistic, value: Option<f64>) -> String {
    match value {
        Some(v) if stat == Statistic::Count => to_fixed(v, 0),
        Some(v) => to_fixed(v, 3),
        None => String::new(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones() {
        assert_eq!("rural".parse::<Zone>(), Ok(Zone::Rural));
        assert_eq!("motorway".parse::<Zone>().map(Zone::label_color),
                   Ok("purple"));
        assert_eq!("city".parse::<Zone>(),
                   Err(Error::UnknownZone("city".into())));
        assert_eq!(Zone::Urban.to_string(), "urban");
    }

    #[test]
    fn zone_palettes() {
        assert!(std::ptr::eq(Zone::Rural.palette(), palettes::rural()));
        assert!(std::ptr::eq(Zone::Motorway.palette(), palettes::urban()));
        assert!(std::ptr::eq(zone_palette(Some("rural")), palettes::rural()));
        assert!(std::ptr::eq(zone_palette(Some("??")), palettes::urban()));
        assert!(std::ptr::eq(zone_palette(None), palettes::urban()));
    }

    #[test]
    fn zone_serde() {
        let z: Zone = serde_json::from_str("\"urban\"").unwrap();
        assert_eq!(z, Zone::Urban);
        assert_eq!(serde_json::to_string(&Zone::Motorway).unwrap(),
                   "\"motorway\"");
    }

    #[test]
    fn directions() {
        let d = |b| cardinal_direction(Some(b));
        assert_eq!(d(0.), "north bound");
        assert_eq!(d(22.4), "north bound");
        assert_eq!(d(22.5), "north-east bound");
        assert_eq!(d(90.), "east bound");
        assert_eq!(d(180.), "south bound");
        assert_eq!(d(270.), "west bound");
        assert_eq!(d(315.), "north-west bound");
        assert_eq!(d(337.5), "north bound");
        assert_eq!(d(360.), "north bound");
        assert_eq!(d(-90.), "west bound");
        assert_eq!(d(-1e-300), "north bound");
        assert_eq!(cardinal_direction(Some(f64::NAN)), "unknown");
    }

    #[test]
    fn statistics() {
        assert_eq!(format_statistic(Statistic::Count, Some(42.)), "42");
        assert_eq!(format_statistic(Statistic::Mean, Some(1.23456)), "1.235");
        assert_eq!(format_statistic(Statistic::Max, Some(2.)), "2.000");
        assert_eq!(format_statistic(Statistic::Min, None), "");
        assert_eq!(format_statistic(Statistic::Median, Some(0.0625)), "0.063");
        assert_eq!(format_statistic(Statistic::Min, Some(0.3125)), "0.313");
        assert_eq!(format_statistic(Statistic::Count, Some(2.5)), "3");
        let headers: Vec<_> = Statistic::ALL.iter().map(|s| s.header()).collect();
        assert_eq!(headers, ["n", "min", "q50", "max", "mean"]);
    }

    #[test]
    fn properties() {
        let units: Vec<_> = Property::ALL.iter()
            .map(|p| (p.label(), p.unit())).collect();
        assert_eq!(units, [("Overtaker", "m"), ("Stationary", "m"),
                           ("Speed", "m/s")]);
    }
}
