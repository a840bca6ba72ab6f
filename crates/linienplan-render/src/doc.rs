//! The structured vector document and its assembly.

use indexmap::IndexMap;
use linienplan_core::{Feature, FeatureGroup, Frame, StyleTable};

use crate::path::{PathData, transcode_geometry};

/// One emitted feature path: deterministic id, resolved stroke color, and the
/// transcoded path data.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub id: String,
    pub color: String,
    pub data: PathData,
}

/// One rendering layer of the document; stroke width/opacity are fixed for
/// every path in the group.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGroup {
    pub id: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub paths: Vec<RoutePath>,
}

/// The assembled output of one render request. Constructed once by
/// [`transcode`], immutable afterwards; serialization syntax is the sink's
/// concern (see [`crate::svg::write_svg`]).
#[derive(Debug, Clone, PartialEq)]
pub struct PathDocument {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<PathGroup>,
}

/// Transcodes grouped features into a [`PathDocument`] using the shared frame.
///
/// Groups keep caller order (later groups draw on top). Within a group,
/// features are emitted grouped by category in first-encounter order, and
/// within a category in input order; ids are
/// `{group}-{category}-{index within category}`, stable across runs and unique
/// within the document. Features whose geometry transcodes to empty data are
/// excluded rather than emitted with an empty `d`.
pub fn transcode(groups: &[FeatureGroup], frame: &Frame, style: &StyleTable) -> PathDocument {
    let transform = &frame.transform;
    let out_groups = groups
        .iter()
        .map(|group| {
            let mut by_category: IndexMap<&str, Vec<&Feature>> = IndexMap::new();
            for feature in &group.features {
                by_category
                    .entry(feature.category.as_str())
                    .or_default()
                    .push(feature);
            }

            let mut paths = Vec::with_capacity(group.features.len());
            for (category, features) in &by_category {
                let color = style.resolve(category);
                let mut idx = 0usize;
                for feature in features {
                    let data = transcode_geometry(&feature.geometry, transform);
                    if data.is_empty() {
                        continue;
                    }
                    paths.push(RoutePath {
                        id: format!("{}-{}-{}", group.name, category, idx),
                        color: color.to_string(),
                        data,
                    });
                    idx += 1;
                }
            }

            PathGroup {
                id: group.name.clone(),
                stroke_width: group.stroke.width,
                stroke_opacity: group.stroke.opacity,
                paths,
            }
        })
        .collect();

    PathDocument {
        width: frame.viewport.width() * transform.scale_x,
        height: frame.viewport.height() * transform.scale_y,
        groups: out_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linienplan_core::{Geometry, GroupStroke, Polyline, point};

    fn line(category: &str, points: Vec<(f64, f64)>) -> Feature {
        Feature::new(
            category,
            Geometry::Polyline(Polyline::new(
                points.into_iter().map(|(x, y)| point(x, y)).collect(),
            )),
        )
    }

    fn routes_group(features: Vec<Feature>) -> FeatureGroup {
        FeatureGroup::new("routes", GroupStroke::new(2.5, 0.9), features)
    }

    #[test]
    fn ids_disambiguate_disjoint_segments_of_one_category() {
        let groups = vec![routes_group(vec![
            line("A", vec![(0.0, 0.0), (1.0, 1.0)]),
            line("B", vec![(2.0, 0.0), (3.0, 1.0)]),
            line("A", vec![(4.0, 0.0), (5.0, 1.0)]),
        ])];
        let frame = Frame::from_groups(&groups).unwrap();
        let doc = transcode(&groups, &frame, &StyleTable::new());

        let ids: Vec<&str> = doc.groups[0].paths.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["routes-A-0", "routes-A-1", "routes-B-0"]);
    }

    #[test]
    fn categories_keep_first_encounter_order() {
        let groups = vec![routes_group(vec![
            line("Q", vec![(0.0, 0.0), (1.0, 1.0)]),
            line("A", vec![(2.0, 0.0), (3.0, 1.0)]),
            line("Q", vec![(4.0, 0.0), (5.0, 1.0)]),
        ])];
        let frame = Frame::from_groups(&groups).unwrap();
        let doc = transcode(&groups, &frame, &StyleTable::new());
        let ids: Vec<&str> = doc.groups[0].paths.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["routes-Q-0", "routes-Q-1", "routes-A-0"]);
    }

    #[test]
    fn style_resolution_mixes_mapped_and_fallback_colors() {
        let mut style = StyleTable::new();
        style.insert("B", "#FF0000");
        let groups = vec![routes_group(vec![
            line("A", vec![(0.0, 0.0), (1.0, 1.0)]),
            line("B", vec![(2.0, 0.0), (3.0, 1.0)]),
        ])];
        let frame = Frame::from_groups(&groups).unwrap();
        let doc = transcode(&groups, &frame, &style);

        let colors: Vec<&str> = doc.groups[0]
            .paths
            .iter()
            .map(|p| p.color.as_str())
            .collect();
        assert_eq!(colors, ["#333333", "#FF0000"]);
    }

    #[test]
    fn empty_geometry_is_excluded_from_the_group() {
        let groups = vec![routes_group(vec![
            line("A", vec![(0.0, 0.0), (1.0, 1.0)]),
            line("A", vec![]),
            Feature::new(
                "A",
                Geometry::Unsupported {
                    kind: "Polygon".to_string(),
                },
            ),
        ])];
        let frame = Frame::from_groups(&groups).unwrap();
        let doc = transcode(&groups, &frame, &StyleTable::new());
        assert_eq!(doc.groups[0].paths.len(), 1);
        assert_eq!(doc.groups[0].paths[0].id, "routes-A-0");
    }

    #[test]
    fn group_order_and_stroke_policy_are_preserved() {
        let network = routes_group(vec![line("A", vec![(0.0, 0.0), (1.0, 1.0)])]);
        let reference = FeatureGroup::new(
            "reference",
            GroupStroke::new(5.0, 0.95),
            vec![line("reference", vec![(0.0, 0.0), (2.0, 2.0)])],
        );
        let groups = vec![network, reference];
        let frame = Frame::from_groups(&groups).unwrap();
        let doc = transcode(&groups, &frame, &StyleTable::new());

        assert_eq!(doc.groups.len(), 2);
        assert_eq!(doc.groups[0].id, "routes");
        assert_eq!(doc.groups[1].id, "reference");
        assert_eq!(doc.groups[1].stroke_width, 5.0);
        assert_eq!(doc.groups[1].stroke_opacity, 0.95);
    }

    #[test]
    fn document_dimensions_come_from_the_viewport() {
        let groups = vec![routes_group(vec![line("A", vec![(0.0, 0.0), (10.0, 5.0)])])];
        let frame = Frame::from_groups(&groups).unwrap();
        let doc = transcode(&groups, &frame, &StyleTable::new());
        assert_eq!(doc.width, 10.0);
        assert_eq!(doc.height, 5.0);
    }

    #[test]
    fn transcode_is_deterministic() {
        let mut style = StyleTable::nyc_subway();
        style.insert("X", "#123456");
        let groups = vec![routes_group(vec![
            line("A", vec![(0.25, 1.5), (3.75, 2.125)]),
            line("X", vec![(-1.0, 0.0), (2.0, 8.0)]),
        ])];
        let frame = Frame::from_groups(&groups).unwrap();
        let a = transcode(&groups, &frame, &style);
        let b = transcode(&groups, &frame, &style);
        assert_eq!(a, b);
    }
}
