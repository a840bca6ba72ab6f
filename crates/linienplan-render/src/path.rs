//! Geometry → typed path commands.

use linienplan_core::{FrameTransform, Geometry, Point, Polyline};

use crate::fmt::PathFormat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
}

/// Typed path data. Each `MoveTo` starts a disjoint sub-path; multi-part
/// geometries become consecutive sub-paths with no connecting or closing
/// segments between parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    cmds: Vec<PathCmd>,
}

impl PathData {
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn to_svg(&self, format: &PathFormat) -> String {
        let mut out = String::new();
        self.write_svg(&mut out, format);
        out
    }

    /// Writes the `d`-attribute form: `M x y L x y ...`, sub-paths separated
    /// by a single space.
    pub fn write_svg(&self, out: &mut String, format: &PathFormat) {
        for (i, cmd) in self.cmds.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let p = match cmd {
                PathCmd::MoveTo(p) => {
                    out.push_str("M ");
                    p
                }
                PathCmd::LineTo(p) => {
                    out.push_str("L ");
                    p
                }
            };
            format.write(out, p.x);
            out.push(' ');
            format.write(out, p.y);
        }
    }
}

/// Transcodes one polyline into drawing-space path commands.
///
/// Degenerate polylines (fewer than two points) yield empty data; callers must
/// not emit a path element for them.
pub fn transcode_polyline(line: &Polyline, transform: &FrameTransform) -> PathData {
    if line.is_degenerate() {
        return PathData::default();
    }
    let mut cmds = Vec::with_capacity(line.points.len());
    for (i, p) in line.points.iter().enumerate() {
        let p = transform.apply(*p);
        cmds.push(if i == 0 {
            PathCmd::MoveTo(p)
        } else {
            PathCmd::LineTo(p)
        });
    }
    PathData { cmds }
}

/// Transcodes a geometry, flattening multi-polyline parts into sub-paths.
///
/// Empty parts are dropped silently; unsupported shapes contribute nothing and
/// log a warning (a single malformed feature never aborts a render).
pub fn transcode_geometry(geometry: &Geometry, transform: &FrameTransform) -> PathData {
    match geometry {
        Geometry::Polyline(line) => transcode_polyline(line, transform),
        Geometry::MultiPolyline(multi) => {
            let mut data = PathData::default();
            for part in &multi.parts {
                data.cmds.extend(transcode_polyline(part, transform).cmds);
            }
            data
        }
        Geometry::Unsupported { kind } => {
            tracing::warn!(%kind, "unsupported geometry shape, contributing no path");
            PathData::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linienplan_core::{Feature, FeatureGroup, Frame, GroupStroke, MultiPolyline, point};

    fn frame_for(points: Vec<Point>) -> Frame {
        let group = FeatureGroup::new(
            "g",
            GroupStroke::new(1.0, 1.0),
            vec![Feature::new(
                "x",
                Geometry::Polyline(Polyline::new(points)),
            )],
        );
        Frame::from_groups(&[group]).unwrap()
    }

    #[test]
    fn polyline_scenario_path_string() {
        let points = vec![point(0.0, 0.0), point(10.0, 5.0)];
        let frame = frame_for(points.clone());
        let data = transcode_polyline(&Polyline::new(points), &frame.transform);
        assert_eq!(data.to_svg(&PathFormat::Full), "M 0 5 L 10 0");
    }

    #[test]
    fn degenerate_polylines_yield_empty_data() {
        let frame = frame_for(vec![point(0.0, 0.0), point(1.0, 1.0)]);
        assert!(transcode_polyline(&Polyline::default(), &frame.transform).is_empty());
        let single = Polyline::new(vec![point(0.5, 0.5)]);
        assert!(transcode_polyline(&single, &frame.transform).is_empty());
    }

    #[test]
    fn multi_part_join_equals_concatenation() {
        let p1 = Polyline::new(vec![point(0.0, 0.0), point(2.0, 2.0)]);
        let p2 = Polyline::new(vec![point(5.0, 1.0), point(6.0, 0.0)]);
        let frame = frame_for(vec![point(0.0, 0.0), point(6.0, 2.0)]);
        let t = &frame.transform;
        let format = PathFormat::Full;

        let multi = Geometry::MultiPolyline(MultiPolyline::new(vec![p1.clone(), p2.clone()]));
        let joined = transcode_geometry(&multi, t).to_svg(&format);
        let expected = format!(
            "{} {}",
            transcode_polyline(&p1, t).to_svg(&format),
            transcode_polyline(&p2, t).to_svg(&format)
        );
        assert_eq!(joined, expected);
    }

    #[test]
    fn multi_part_drops_empty_parts_silently() {
        let p1 = Polyline::new(vec![point(0.0, 0.0), point(2.0, 2.0)]);
        let frame = frame_for(vec![point(0.0, 0.0), point(2.0, 2.0)]);
        let with_gaps = Geometry::MultiPolyline(MultiPolyline::new(vec![
            Polyline::default(),
            p1.clone(),
            Polyline::new(vec![point(1.0, 1.0)]),
        ]));
        assert_eq!(
            transcode_geometry(&with_gaps, &frame.transform),
            transcode_polyline(&p1, &frame.transform)
        );
    }

    #[test]
    fn unsupported_geometry_contributes_nothing() {
        let frame = frame_for(vec![point(0.0, 0.0), point(1.0, 1.0)]);
        let geom = Geometry::Unsupported {
            kind: "Point".to_string(),
        };
        assert!(transcode_geometry(&geom, &frame.transform).is_empty());
    }
}
