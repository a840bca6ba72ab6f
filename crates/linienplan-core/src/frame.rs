//! Shared coordinate framing for all rendering passes.
//!
//! The viewport and its derived transform are computed once per render request
//! and passed by value into every pass (vector and raster). No pass may
//! recompute them independently: divergent rounding would break the visual
//! registration between outputs.

use crate::error::{Error, Result};
use crate::geom::{Box2D, FeatureGroup, Point, point};

/// Bounding rectangle, in source coordinates, covering all rendered geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn from_box(b: Box2D) -> Self {
        Self {
            min_x: b.min.x,
            min_y: b.min.y,
            max_x: b.max.x,
            max_y: b.max.y,
        }
    }
}

/// Affine map from projected coordinates (Y up) to drawing coordinates (Y down).
///
/// The offsets are derived so the viewport's min X maps to 0 and its max Y maps
/// to 0; the drawing-space origin is the viewport's top-left corner. Scale
/// factors default to 1 and are caller-overridable (unit conversion); the
/// flip/offset derivation itself is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FrameTransform {
    pub fn apply(&self, p: Point) -> Point {
        point(
            p.x * self.scale_x + self.offset_x,
            -p.y * self.scale_y + self.offset_y,
        )
    }

    pub fn invert(&self, p: Point) -> Point {
        point(
            (p.x - self.offset_x) / self.scale_x,
            (self.offset_y - p.y) / self.scale_y,
        )
    }
}

/// The (viewport, transform) pair shared by every rendering pass of one
/// render request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub transform: FrameTransform,
}

impl Frame {
    /// Computes the frame for a render request: the union of every geometry's
    /// bounding box across all groups, plus the derived Y-flip transform.
    ///
    /// Fails with [`Error::EmptyInput`] when no geometry contributes a point;
    /// there is no meaningful viewport for zero geometries.
    pub fn from_groups(groups: &[FeatureGroup]) -> Result<Self> {
        Self::from_groups_scaled(groups, 1.0, 1.0)
    }

    /// Like [`Frame::from_groups`] with a per-axis scale override.
    pub fn from_groups_scaled(groups: &[FeatureGroup], scale_x: f64, scale_y: f64) -> Result<Self> {
        let mut acc: Option<Box2D> = None;
        for group in groups {
            for feature in &group.features {
                let Some(b) = feature.geometry.bounds() else {
                    continue;
                };
                acc = Some(match acc {
                    Some(u) => u.union(&b),
                    None => b,
                });
            }
        }
        let b = acc.ok_or(Error::EmptyInput)?;
        let viewport = Viewport::from_box(b);
        let transform = FrameTransform {
            scale_x,
            scale_y,
            offset_x: -viewport.min_x * scale_x,
            offset_y: viewport.max_y * scale_y,
        };
        Ok(Self {
            viewport,
            transform,
        })
    }
}
