//! Category-to-color styling with an explicit fallback.

use indexmap::IndexMap;

/// Color applied to categories that have no table entry.
///
/// Inherited from the reference dataset's export: unmapped route codes draw in
/// dark gray rather than failing. Kept as the documented "unknown route"
/// styling; override per table via [`StyleTable::with_fallback`].
pub const FALLBACK_COLOR: &str = "#333333";

/// Route category → hex color, with a defined fallback for unknown keys.
///
/// Lookup never fails. Insertion order is preserved so iteration stays
/// deterministic across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    colors: IndexMap<String, String>,
    fallback: String,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleTable {
    pub fn new() -> Self {
        Self::with_fallback(FALLBACK_COLOR)
    }

    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            colors: IndexMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn insert(&mut self, category: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(category.into(), color.into());
    }

    pub fn contains(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolves a category to its color, falling back for unknown keys.
    pub fn resolve(&self, category: &str) -> &str {
        match self.colors.get(category) {
            Some(color) => color,
            None => {
                tracing::debug!(category, fallback = %self.fallback, "no style entry for category");
                &self.fallback
            }
        }
    }

    /// The official MTA route colors for the NYC subway, keyed by route code.
    pub fn nyc_subway() -> Self {
        let mut table = Self::new();
        for (route, color) in [
            ("1", "#EE352E"),
            ("2", "#EE352E"),
            ("3", "#EE352E"),
            ("4", "#00933C"),
            ("5", "#00933C"),
            ("6", "#00933C"),
            ("7", "#B933AD"),
            ("A", "#0039A6"),
            ("C", "#0039A6"),
            ("E", "#0039A6"),
            ("B", "#FF6319"),
            ("D", "#FF6319"),
            ("F", "#FF6319"),
            ("M", "#FF6319"),
            ("G", "#6CBE45"),
            ("J", "#996633"),
            ("Z", "#996633"),
            ("L", "#A7A9AC"),
            ("N", "#FCCC0A"),
            ("Q", "#FCCC0A"),
            ("R", "#FCCC0A"),
            ("W", "#FCCC0A"),
            ("S", "#808183"),
        ] {
            table.insert(route, color);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_mapped_color() {
        let table = StyleTable::nyc_subway();
        assert_eq!(table.resolve("A"), "#0039A6");
        assert_eq!(table.resolve("7"), "#B933AD");
    }

    #[test]
    fn unknown_category_always_resolves_to_the_fallback() {
        let table = StyleTable::nyc_subway();
        for key in ["", "IBX", "unknown", "99"] {
            assert_eq!(table.resolve(key), FALLBACK_COLOR);
        }
    }

    #[test]
    fn fallback_is_configurable() {
        let mut table = StyleTable::with_fallback("#ABCDEF");
        table.insert("B", "#FF0000");
        assert_eq!(table.resolve("B"), "#FF0000");
        assert_eq!(table.resolve("A"), "#ABCDEF");
    }
}
