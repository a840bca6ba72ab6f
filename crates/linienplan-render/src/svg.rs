//! SVG document sink.
//!
//! This is the file-format contract for the editable vector output: the
//! envelope's `viewBox`/`width`/`height` must reproduce the frame's computed
//! doubles exactly so raster passes rendered against the same frame stay
//! visually interchangeable.

use std::fmt::Write as _;

use crate::doc::PathDocument;
use crate::fmt::PathFormat;

/// Serializes a [`PathDocument`] to SVG markup.
///
/// `format` governs path-data coordinates only; envelope dimensions are always
/// written in full precision to keep registration with raster outputs.
pub fn write_svg(doc: &PathDocument, format: &PathFormat) -> String {
    let mut out = String::new();
    let full = PathFormat::Full;

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 "#);
    full.write(&mut out, doc.width);
    out.push(' ');
    full.write(&mut out, doc.height);
    out.push_str(r#"" width=""#);
    full.write(&mut out, doc.width);
    out.push_str(r#"" height=""#);
    full.write(&mut out, doc.height);
    out.push_str("\">\n");

    for group in &doc.groups {
        let _ = write!(
            &mut out,
            r#"<g id="{}" stroke-width="{}" fill="none" stroke-opacity="{}">"#,
            escape_attr_display(&group.id),
            group.stroke_width,
            group.stroke_opacity
        );
        out.push('\n');
        for path in &group.paths {
            let _ = write!(
                &mut out,
                r#"  <path id="{}" stroke="{}" d=""#,
                escape_attr_display(&path.id),
                escape_attr_display(&path.color)
            );
            path.data.write_svg(&mut out, format);
            out.push_str("\"/>\n");
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn escape_attr_display(text: &str) -> EscapeAttrDisplay<'_> {
    EscapeAttrDisplay(text)
}

struct EscapeAttrDisplay<'a>(&'a str);

impl std::fmt::Display for EscapeAttrDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.0;
        let bytes = text.as_bytes();
        let mut start = 0usize;
        for (i, &b) in bytes.iter().enumerate() {
            let esc = match b {
                b'&' => Some("&amp;"),
                b'<' => Some("&lt;"),
                b'"' => Some("&quot;"),
                b'\'' => Some("&#39;"),
                _ => None,
            };
            let Some(esc) = esc else {
                continue;
            };
            if start < i {
                f.write_str(&text[start..i])?;
            }
            f.write_str(esc)?;
            start = i + 1;
        }
        if start < text.len() {
            f.write_str(&text[start..])?;
        }
        Ok(())
    }
}
