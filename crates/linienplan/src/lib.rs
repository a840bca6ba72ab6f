#![forbid(unsafe_code)]

//! `linienplan` renders geographic line networks (a transit system's routes
//! plus an optional reference route) into aligned map layers.
//!
//! The pipeline is: compute one [`Frame`] over every supplied group, transcode
//! all geometries against it, and serialize. Raster composites (feature
//! `raster`) rasterize the emitted SVG, so they inherit the same frame by
//! construction and stay registered with the vector output.
//!
//! # Features
//!
//! - `raster`: enable PNG/JPG output and basemap compositing via pure-Rust
//!   SVG rasterization ([`raster`]).

pub use linienplan_core::{
    Feature, FeatureGroup, Frame, FrameTransform, Geometry, GroupStroke, MultiPolyline, Point,
    Polyline, StyleTable, Viewport, point,
};
pub use linienplan_render::{
    PathCmd, PathData, PathDocument, PathFormat, PathGroup, RoutePath, transcode,
    transcode_geometry, transcode_polyline, write_svg,
};

#[cfg(feature = "raster")]
pub mod raster;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Frame(#[from] linienplan_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders the supplied groups to an SVG string with a frame computed from
/// their union. Group order encodes z-order (later groups on top).
pub fn render_svg(
    groups: &[FeatureGroup],
    style: &StyleTable,
    format: &PathFormat,
) -> Result<String> {
    let frame = Frame::from_groups(groups)?;
    Ok(render_svg_framed(groups, &frame, style, format))
}

/// Renders against an already-computed frame.
///
/// Use this when several passes (vector and raster, or multiple documents)
/// must share one frame: compute it once with [`Frame::from_groups`] and hand
/// the same value to each pass.
pub fn render_svg_framed(
    groups: &[FeatureGroup],
    frame: &Frame,
    style: &StyleTable,
    format: &PathFormat,
) -> String {
    let doc = transcode(groups, frame, style);
    write_svg(&doc, format)
}
