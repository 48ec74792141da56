//! Output formatting for building lists and walking routes.

use std::collections::BTreeMap;
use std::io::{self, Write};

use campuspaths_lib::{Path, Point};
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Route with the long names of both endpoints, as rendered to the user.
#[derive(Debug, Serialize)]
pub struct RouteView<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    #[serde(flatten)]
    pub path: &'a Path<Point>,
}

/// Write `short: long` lines (or a JSON object) for every building.
pub fn write_buildings<W: Write>(
    out: &mut W,
    format: OutputFormat,
    buildings: &BTreeMap<&str, &str>,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for (short, long) in buildings {
                writeln!(out, "{short}: {long}")?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, buildings),
    }
}

/// Write a walking route.
///
/// Text output has one `Walk` line per segment followed by the total.
pub fn write_route<W: Write>(
    out: &mut W,
    format: OutputFormat,
    route: &RouteView<'_>,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Path from {} to {}:", route.origin, route.destination)?;
            for segment in route.path {
                writeln!(
                    out,
                    "\tWalk {:.0} feet {} to {}",
                    segment.cost(),
                    compass_direction(segment.start(), segment.end()),
                    segment.end()
                )?;
            }
            writeln!(out, "Total distance: {:.0} feet", route.path.cost())
        }
        OutputFormat::Json => write_json(out, route),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Eight-point compass heading from `from` to `to`.
///
/// Map coordinates grow downward, so a smaller `y` is north.
pub fn compass_direction(from: &Point, to: &Point) -> &'static str {
    let dx = to.x - from.x;
    let dy = from.y - to.y;
    if dx == 0.0 && dy == 0.0 {
        return "in place";
    }

    // Sectors are 45 degrees wide and centred on each heading, east first.
    let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    const HEADINGS: [&str; 8] = ["E", "NE", "N", "NW", "W", "SW", "S", "SE"];
    let sector = ((angle + 22.5) / 45.0).floor() as usize % HEADINGS.len();
    HEADINGS[sector]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("write to memory");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn compass_headings_follow_screen_coordinates() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(compass_direction(&origin, &Point::new(10.0, 0.0)), "E");
        assert_eq!(compass_direction(&origin, &Point::new(0.0, -10.0)), "N");
        assert_eq!(compass_direction(&origin, &Point::new(0.0, 10.0)), "S");
        assert_eq!(compass_direction(&origin, &Point::new(-10.0, 0.0)), "W");
        assert_eq!(compass_direction(&origin, &Point::new(10.0, 10.0)), "SE");
        assert_eq!(compass_direction(&origin, &Point::new(-10.0, -10.0)), "NW");
        assert_eq!(compass_direction(&origin, &origin), "in place");
    }

    #[test]
    fn buildings_render_as_lines() {
        let names = BTreeMap::from([("CSE", "Allen Center"), ("MGH", "Mary Gates Hall")]);
        let text = render(|out| write_buildings(out, OutputFormat::Text, &names));
        assert_eq!(text, "CSE: Allen Center\nMGH: Mary Gates Hall\n");
    }

    #[test]
    fn buildings_render_as_json_object() {
        let names = BTreeMap::from([("CSE", "Allen Center")]);
        let json = render(|out| write_buildings(out, OutputFormat::Json, &names));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["CSE"], "Allen Center");
    }

    #[test]
    fn route_text_lists_each_segment() {
        let path = Path::new(Point::new(0.0, 0.0))
            .extend(Point::new(50.0, 50.0), 70.0)
            .extend(Point::new(100.0, 0.0), 70.0);
        let route = RouteView {
            origin: "Mary Gates Hall",
            destination: "Allen Center",
            path: &path,
        };
        let text = render(|out| write_route(out, OutputFormat::Text, &route));
        assert_eq!(
            text,
            "Path from Mary Gates Hall to Allen Center:\n\
             \tWalk 70 feet SE to (50, 50)\n\
             \tWalk 70 feet NE to (100, 0)\n\
             Total distance: 140 feet\n"
        );
    }

    #[test]
    fn route_json_flattens_path() {
        let path = Path::new(Point::new(0.0, 0.0)).extend(Point::new(3.0, 4.0), 5.0);
        let route = RouteView {
            origin: "A",
            destination: "B",
            path: &path,
        };
        let json = render(|out| write_route(out, OutputFormat::Json, &route));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["origin"], "A");
        assert_eq!(value["cost"], 5.0);
        assert_eq!(value["path"][0]["end"]["x"], 3.0);
    }
}
