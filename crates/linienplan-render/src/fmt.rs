//! Numeric formatting policy for path data and document attributes.
//!
//! All coordinate stringification funnels through [`PathFormat`] so precision
//! and trailing-zero behavior are one tested concern instead of per-call
//! string interpolation.

use std::fmt::Write as _;

/// How coordinate values are written into path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    /// Shortest round-trip decimal form, matching how the upstream exports
    /// stringify doubles. No rounding beyond the input's native precision.
    #[default]
    Full,
    /// Fixed number of fractional digits, trailing zeros and a dangling dot
    /// trimmed.
    Fixed(u8),
}

impl PathFormat {
    pub fn format(&self, v: f64) -> String {
        let mut out = String::new();
        self.write(&mut out, v);
        out
    }

    /// Appends `v` to `out`. Non-finite values and `-0` normalize to `0`.
    pub fn write(&self, out: &mut String, v: f64) {
        if !v.is_finite() {
            out.push('0');
            return;
        }
        let v = if v == 0.0 { 0.0 } else { v };
        match self {
            PathFormat::Full => {
                let mut buf = ryu_js::Buffer::new();
                out.push_str(buf.format_finite(v));
            }
            PathFormat::Fixed(decimals) => {
                let decimals = usize::from(*decimals);
                let start = out.len();
                let _ = write!(out, "{v:.decimals$}");
                if out.as_bytes()[start..].contains(&b'.') {
                    trim_trailing_zeros_and_dot(out, start);
                }
                if &out[start..] == "-0" {
                    out.truncate(start);
                    out.push('0');
                }
            }
        }
    }
}

fn trim_trailing_zeros_and_dot(out: &mut String, start: usize) {
    while out.len() > start && out.as_bytes()[out.len() - 1] == b'0' {
        out.pop();
    }
    if out.len() > start && out.as_bytes()[out.len() - 1] == b'.' {
        out.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_matches_expected() {
        let f = PathFormat::Full;
        assert_eq!(f.format(f64::NAN), "0");
        assert_eq!(f.format(f64::INFINITY), "0");
        assert_eq!(f.format(-0.0), "0");
        assert_eq!(f.format(0.0), "0");
        assert_eq!(f.format(10.0), "10");
        assert_eq!(f.format(-1.5), "-1.5");
        assert_eq!(f.format(0.1), "0.1");
    }

    #[test]
    fn fixed_rounds_and_trims() {
        let f = PathFormat::Fixed(3);
        assert_eq!(f.format(f64::NAN), "0");
        assert_eq!(f.format(1.0), "1");
        assert_eq!(f.format(1.23456), "1.235");
        assert_eq!(f.format(1.2300), "1.23");
        assert_eq!(f.format(-0.0001), "0");
        assert_eq!(PathFormat::Fixed(0).format(2.6), "3");
        assert_eq!(PathFormat::Fixed(0).format(-0.4), "0");
    }
}
