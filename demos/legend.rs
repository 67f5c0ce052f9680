use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGBA8;
use overtaking_colors::{palettes, road::Zone, style, ColorRange,
                        HistogramConfig, ResampledRamp};

type Err = Box<dyn Error>;

fn css_string(c: &RGBA8) -> String {
    format!("rgba({},{},{},{:.3})", c.r, c.g, c.b, c.a as f64 / 255.)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGBA8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn range(fh: &mut impl Write, r: &impl ColorRange<RGBA8>, n: usize,
         width: u32, comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = r.range(0., 1., n).map(|(_, c)| c).collect();
    table_of_colors(fh, &colors, width, comment)
}

fn histogram(fh: &mut impl Write, samples: &[f64],
             palette: &ResampledRamp) -> Result<(), Err> {
    let config = HistogramConfig::default();
    let bars = config.bars(samples, palette)?;
    let max = bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    writeln!(fh, "<table style=\"border-spacing: 4px\"><tr>")?;
    // Largest distances first, as on the road panel.
    for b in bars.iter().rev() {
        let height = 150 * b.count / max;
        writeln!(fh, "  <td style=\"vertical-align: bottom\">\
                      <div style=\"width: 40px; height: {height}px; \
                      background-color: {}\"></div></td>", b.color)?;
    }
    writeln!(fh, "</tr><tr>")?;
    for b in bars.iter().rev() {
        writeln!(fh, "  <td style=\"font-size: small\">{}<br/>({})</td>",
                 b.label, b.count)?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("legend.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <meta charset=\"utf-8\">\n\
                  <title>overtaking-colors: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Distance palettes</h3>")?;
    for zone in [Zone::Urban, Zone::Rural] {
        let p = zone.palette();
        table_of_colors(&mut fh, p.samples(), 2,
                        &format!("{zone} ({} samples)", p.samples().len()))?;
        range(&mut fh, p, 11, 40, &format!("{zone} (every 25 cm)"))?;
    }
    table_of_colors(&mut fh, &[palettes::urban().query(None)], 40,
                    "no measurement")?;

    writeln!(fh, "<h3>Overtaking distance histogram</h3>")?;
    let samples = [0.42, 0.9, 1.1, 1.2, 1.31, 1.35, 1.48, 1.52, 1.6, 1.64,
                   1.7, 1.75, 1.8, 1.95, 2.1, 2.2, 2.4, 2.7, 3.1];
    for zone in [Zone::Urban, Zone::Rural] {
        writeln!(fh, "<p>{zone}</p>")?;
        histogram(&mut fh, &samples, zone.palette())?;
    }

    writeln!(fh, "<h3>Map styles</h3>")?;
    let distance = style::DistanceStyle::default();
    let colors: Vec<_> = (0 ..= 150)
        .map(|i| distance.color(Some(i as f64 * 0.02)))
        .collect();
    table_of_colors(&mut fh, &colors, 2, "mean overtaking distance, 0 to 3 m")?;
    for (name, colormap) in [("grayscale", &style::GRAYSCALE[..]),
                             ("reds", &style::REDS[..])] {
        let count = style::CountStyle::new(colormap, 100.)?;
        let colors: Vec<_> = (0 ..= 100)
            .map(|i| count.color(Some(i as f64)))
            .collect();
        table_of_colors(&mut fh, &colors, 3, &format!("event count ({name})"))?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
