#![forbid(unsafe_code)]

use linienplan::raster::{RasterError, RasterOptions, composite_over_basemap, svg_to_jpeg, svg_to_png};
use linienplan::{
    Feature, FeatureGroup, Geometry, GroupStroke, MultiPolyline, PathFormat, Polyline, StyleTable,
    point, render_svg,
};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Render(linienplan::Error),
    Raster(RasterError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<linienplan::Error> for CliError {
    fn from(value: linienplan::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    reference: Option<String>,
    styles: Option<String>,
    basemap: Option<String>,
    category_key: String,
    format: RenderFormat,
    scale: f32,
    background: Option<String>,
    precision: Option<u8>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "linienplan\n\
\n\
USAGE:\n\
  linienplan [--category-key <property>] [--reference <path>] [--styles <path>]\n\
             [--format svg|png|jpg] [--scale <n>] [--background <css-color>]\n\
             [--basemap <path>] [--precision <digits>] [--out <path>] <path>\n\
\n\
NOTES:\n\
  - <path> is a GeoJSON FeatureCollection of LineString/MultiLineString features\n\
    whose coordinates are already in one projected CRS.\n\
  - --category-key selects the feature property holding the route code (default: route).\n\
  - --reference adds a second, thicker layer drawn on top of the network.\n\
  - --styles points at a JSON object mapping route codes to hex colors;\n\
    the built-in NYC subway table is used when omitted.\n\
  - --basemap composites the rasterized lines over the given backdrop image (png output).\n\
  - SVG prints to stdout by default; raster output defaults to writing next to the input.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        category_key: "route".to_string(),
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--category-key" => {
                let Some(key) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.category_key = key.clone();
            }
            "--reference" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.reference = Some(path.clone());
            }
            "--styles" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.styles = Some(path.clone());
            }
            "--basemap" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.basemap = Some(path.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--precision" => {
                let Some(digits) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.precision = Some(digits.parse::<u8>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

#[derive(Debug, Deserialize)]
struct FeatureCollectionIn {
    #[serde(default)]
    features: Vec<FeatureIn>,
}

#[derive(Debug, Deserialize)]
struct FeatureIn {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    geometry: Option<Value>,
}

fn polyline_from_coords(coords: Option<&Value>) -> Polyline {
    let mut points = Vec::new();
    if let Some(Value::Array(positions)) = coords {
        for pos in positions {
            let x = pos.get(0).and_then(Value::as_f64);
            let y = pos.get(1).and_then(Value::as_f64);
            let (Some(x), Some(y)) = (x, y) else { continue };
            points.push(point(x, y));
        }
    }
    Polyline::new(points)
}

/// Maps a GeoJSON geometry object onto the closed geometry set. Shapes outside
/// the line family come through as `Unsupported` and degrade downstream.
fn geometry_from_geojson(geometry: Option<&Value>) -> Geometry {
    let Some(geometry) = geometry else {
        return Geometry::Unsupported {
            kind: "null".to_string(),
        };
    };
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("unknown");
    match kind {
        "LineString" => Geometry::Polyline(polyline_from_coords(geometry.get("coordinates"))),
        "MultiLineString" => {
            let mut parts = Vec::new();
            if let Some(Value::Array(lines)) = geometry.get("coordinates") {
                for line in lines {
                    parts.push(polyline_from_coords(Some(line)));
                }
            }
            Geometry::MultiPolyline(MultiPolyline::new(parts))
        }
        other => Geometry::Unsupported {
            kind: other.to_string(),
        },
    }
}

fn load_features(path: &str, category_key: &str) -> Result<Vec<Feature>, CliError> {
    let text = std::fs::read_to_string(path)?;
    let collection: FeatureCollectionIn = serde_json::from_str(&text)?;
    let features = collection
        .features
        .into_iter()
        .map(|f| {
            let category = match f.properties.get(category_key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => "unknown".to_string(),
            };
            Feature::new(category, geometry_from_geojson(f.geometry.as_ref()))
        })
        .collect();
    Ok(features)
}

fn load_styles(path: Option<&str>) -> Result<StyleTable, CliError> {
    let Some(path) = path else {
        return Ok(StyleTable::nyc_subway());
    };
    let text = std::fs::read_to_string(path)?;
    let entries: serde_json::Map<String, Value> = serde_json::from_str(&text)?;
    let mut table = StyleTable::new();
    for (category, color) in entries {
        if let Value::String(color) = color {
            table.insert(category, color);
        }
    }
    Ok(table)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: &str, ext: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(input).with_extension(ext)
}

const NETWORK_GROUP: &str = "routes";
const REFERENCE_GROUP: &str = "reference";
const REFERENCE_COLOR: &str = "#0066FF";

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let Some(input) = args.input.as_deref() else {
        return Err(CliError::Usage(usage()));
    };

    let mut groups = vec![FeatureGroup::new(
        NETWORK_GROUP,
        GroupStroke::new(2.5, 0.9),
        load_features(input, &args.category_key)?,
    )];
    if let Some(reference) = args.reference.as_deref() {
        let features = load_features(reference, &args.category_key)?
            .into_iter()
            .map(|f| Feature::new(REFERENCE_GROUP, f.geometry))
            .collect();
        groups.push(FeatureGroup::new(
            REFERENCE_GROUP,
            GroupStroke::new(5.0, 0.95),
            features,
        ));
    }

    let mut style = load_styles(args.styles.as_deref())?;
    if !style.contains(REFERENCE_GROUP) {
        style.insert(REFERENCE_GROUP, REFERENCE_COLOR);
    }

    let format = match args.precision {
        Some(digits) => PathFormat::Fixed(digits),
        None => PathFormat::Full,
    };
    let svg = render_svg(&groups, &style, &format)?;

    let raster_options = RasterOptions {
        scale: args.scale,
        background: args.background.clone(),
        ..Default::default()
    };

    match args.format {
        RenderFormat::Svg => write_text(&svg, args.out.as_deref()),
        RenderFormat::Png => {
            let bytes = match args.basemap.as_deref() {
                Some(path) => {
                    let basemap = std::fs::read(path)?;
                    composite_over_basemap(&svg, &basemap, &raster_options)?
                }
                None => svg_to_png(&svg, &raster_options)?,
            };
            let out = args
                .out
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|| default_raster_out_path(input, "png"));
            std::fs::write(out, bytes)?;
            Ok(())
        }
        RenderFormat::Jpeg => {
            let bytes = svg_to_jpeg(&svg, &raster_options)?;
            let out = args
                .out
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|| default_raster_out_path(input, "jpg"));
            std::fs::write(out, bytes)?;
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    if let Err(err) = run(&argv) {
        eprintln!("{err}");
        std::process::exit(match err {
            CliError::Usage(_) => 2,
            _ => 1,
        });
    }
}
