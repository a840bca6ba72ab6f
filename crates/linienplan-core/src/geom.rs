//! Line geometries in projected planar coordinates.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Box2D = euclid::Box2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Ordered sequence of points forming one continuous line.
///
/// Point order defines drawn path order. Polylines with fewer than two points
/// are degenerate: they still contribute to viewport bounds (a single point is
/// a valid extent) but produce no path data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Axis-aligned bounding box over all points, `None` when empty.
    pub fn bounds(&self) -> Option<Box2D> {
        let (first, rest) = self.points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Box2D::new(min, max))
    }
}

/// One logical feature made of multiple disjoint polyline parts, e.g. a route
/// with a gap or a branch. Part order is the stored order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolyline {
    pub parts: Vec<Polyline>,
}

impl MultiPolyline {
    pub fn new(parts: Vec<Polyline>) -> Self {
        Self { parts }
    }
}

/// Closed set of geometry shapes accepted by the renderer.
///
/// Upstream geometry sources occasionally contain shapes outside the line
/// family (points, polygons). Those arrive as [`Geometry::Unsupported`] and
/// degrade to an empty path contribution with a warning log; they are never a
/// render error.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polyline(Polyline),
    MultiPolyline(MultiPolyline),
    Unsupported { kind: String },
}

impl Geometry {
    /// Bounding box flattened over all constituent parts.
    pub fn bounds(&self) -> Option<Box2D> {
        match self {
            Geometry::Polyline(line) => line.bounds(),
            Geometry::MultiPolyline(multi) => {
                let mut acc: Option<Box2D> = None;
                for part in &multi.parts {
                    let Some(b) = part.bounds() else { continue };
                    acc = Some(match acc {
                        Some(u) => u.union(&b),
                        None => b,
                    });
                }
                acc
            }
            Geometry::Unsupported { .. } => None,
        }
    }
}

/// A named category (route code) with one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub category: String,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(category: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            category: category.into(),
            geometry,
        }
    }
}

/// Stroke policy fixed for every feature in a group; only color and geometry
/// vary per feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStroke {
    pub width: f64,
    pub opacity: f64,
}

impl GroupStroke {
    pub fn new(width: f64, opacity: f64) -> Self {
        Self { width, opacity }
    }
}

/// A rendering layer: ordered features sharing one stroke policy.
///
/// Callers encode z-order by group sequence; later groups draw on top.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub name: String,
    pub stroke: GroupStroke,
    pub features: Vec<Feature>,
}

impl FeatureGroup {
    pub fn new(name: impl Into<String>, stroke: GroupStroke, features: Vec<Feature>) -> Self {
        Self {
            name: name.into(),
            stroke,
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_bounds_cover_all_points() {
        let line = Polyline::new(vec![point(3.0, -1.0), point(-2.0, 7.0), point(0.0, 0.0)]);
        let b = line.bounds().unwrap();
        assert_eq!(b.min, point(-2.0, -1.0));
        assert_eq!(b.max, point(3.0, 7.0));
    }

    #[test]
    fn empty_polyline_has_no_bounds() {
        assert_eq!(Polyline::default().bounds(), None);
    }

    #[test]
    fn single_point_polyline_is_degenerate_but_bounded() {
        let line = Polyline::new(vec![point(5.0, 5.0)]);
        assert!(line.is_degenerate());
        let b = line.bounds().unwrap();
        assert_eq!(b.min, b.max);
    }

    #[test]
    fn multi_polyline_bounds_flatten_parts_and_skip_empty_ones() {
        let multi = MultiPolyline::new(vec![
            Polyline::new(vec![point(0.0, 0.0), point(1.0, 1.0)]),
            Polyline::default(),
            Polyline::new(vec![point(-4.0, 2.0), point(3.0, 9.0)]),
        ]);
        let b = Geometry::MultiPolyline(multi).bounds().unwrap();
        assert_eq!(b.min, point(-4.0, 0.0));
        assert_eq!(b.max, point(3.0, 9.0));
    }

    #[test]
    fn unsupported_geometry_has_no_bounds() {
        let geom = Geometry::Unsupported {
            kind: "Polygon".to_string(),
        };
        assert_eq!(geom.bounds(), None);
    }
}
