#![forbid(unsafe_code)]

//! Core data model for transit line map rendering.
//!
//! Everything here is in-memory and pure: geometries arrive already projected
//! into a single planar CRS (reading shapefiles/GeoJSON and reprojecting are
//! upstream concerns), and the [`Frame`] computed from them is the one value
//! every downstream rendering pass must share so vector and raster outputs
//! stay registered pixel-for-pixel.

pub mod error;
pub mod frame;
pub mod geom;
pub mod style;

pub use error::{Error, Result};
pub use frame::{Frame, FrameTransform, Viewport};
pub use geom::{
    Feature, FeatureGroup, Geometry, GroupStroke, MultiPolyline, Point, Polyline, point,
};
pub use style::StyleTable;
