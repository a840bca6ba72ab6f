#![forbid(unsafe_code)]

//! Vector-path transcoding for transit line maps.
//!
//! Consumes the grouped geometries and the shared [`Frame`] from
//! `linienplan-core` and produces a [`PathDocument`]: typed path commands with
//! deterministic identifiers and per-feature colors, nested in a
//! viewport-declaring envelope. [`write_svg`] is the document sink that turns
//! that into markup.
//!
//! [`Frame`]: linienplan_core::Frame

pub mod doc;
pub mod fmt;
pub mod path;
pub mod svg;

pub use doc::{PathDocument, PathGroup, RoutePath, transcode};
pub use fmt::PathFormat;
pub use path::{PathCmd, PathData, transcode_geometry, transcode_polyline};
pub use svg::write_svg;
