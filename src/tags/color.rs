//! Chip color assignment.
//!
//! A chip is colored in one of three ways:
//! - static: every chip uses the configured default color
//! - palette: an administrator-supplied JSON object maps exact tag text to a color
//! - hashed: a rolling hash of the tag picks one of [`DYNAMIC_COLORS`]

use std::collections::BTreeMap;

use tracing::warn;

use super::normalize_tag;
use crate::config::TagEditorSettings;

/// Colors picked from by the tag hash, in index order.
pub const DYNAMIC_COLORS: [&str; 6] = [
    "#F59F27", "#4A90D9", "#50B83C", "#9C6ADE", "#DE3618", "#47C1BF",
];

/// Explicit tag colors from the `customTagPalette` option.
///
/// Keys are matched exactly, including case, against the normalized tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPalette {
    colors: BTreeMap<String, String>,
}

impl TagPalette {
    /// Parse a palette from its JSON form.
    ///
    /// Returns `None` for blank input and for anything that is not a flat
    /// JSON object of strings. A bad palette never fails the editor.
    pub fn from_json(json: &str) -> Option<Self> {
        if json.trim().is_empty() {
            return None;
        }
        let colors: BTreeMap<String, String> = match serde_json::from_str(json) {
            Ok(colors) => colors,
            Err(e) => {
                warn!(error = %e, "Ignoring invalid custom tag palette");
                return None;
            }
        };

        for key in colors.keys() {
            let normalized = normalize_tag(key);
            if normalized != *key {
                warn!(
                    key = %key,
                    expected = %normalized,
                    "Palette key is not in sentence case and will never match a tag"
                );
            }
        }

        Some(Self { colors })
    }

    /// Look up the color for an exact tag.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.colors.get(tag).map(String::as_str)
    }
}

/// 32-bit signed rolling hash over the tag's UTF-16 code units.
///
/// `hash = hash * 31 + unit`, wrapping at every step. Stable across runs and
/// platforms.
pub fn tag_hash(tag: &str) -> i32 {
    tag.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Pick a color from [`DYNAMIC_COLORS`] by hash.
pub fn hashed_color(tag: &str) -> &'static str {
    let index = tag_hash(tag).unsigned_abs() as usize % DYNAMIC_COLORS.len();
    DYNAMIC_COLORS[index]
}

/// Get the display color for a tag.
pub fn color_for<'a>(tag: &str, settings: &'a TagEditorSettings) -> &'a str {
    if !settings.use_dynamic_colors {
        return &settings.default_tag_color;
    }
    if let Some(color) = settings.palette.as_ref().and_then(|p| p.get(tag)) {
        return color;
    }
    hashed_color(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic(palette: Option<&str>) -> TagEditorSettings {
        TagEditorSettings {
            use_dynamic_colors: true,
            palette: palette.and_then(TagPalette::from_json),
            ..TagEditorSettings::default()
        }
    }

    #[test]
    fn test_tag_hash_known_values() {
        assert_eq!(tag_hash(""), 0);
        assert_eq!(tag_hash("a"), 97);
        assert_eq!(tag_hash("ab"), 3105);
        assert_eq!(tag_hash("Other"), 76517104);
        assert_eq!(tag_hash("Another"), 813473507);
    }

    #[test]
    fn test_tag_hash_wraps_to_negative() {
        assert_eq!(tag_hash("A quite long tag value"), -464564048);
    }

    #[test]
    fn test_hashed_color_indexes() {
        assert_eq!(hashed_color("a"), DYNAMIC_COLORS[1]);
        assert_eq!(hashed_color("Other"), DYNAMIC_COLORS[4]);
        assert_eq!(hashed_color("Vip"), DYNAMIC_COLORS[3]);
        assert_eq!(hashed_color("A quite long tag value"), DYNAMIC_COLORS[2]);
    }

    #[test]
    fn test_static_color_ignores_tag_and_palette() {
        let settings = TagEditorSettings {
            use_dynamic_colors: false,
            palette: TagPalette::from_json(r##"{"Vip":"#FF0000"}"##),
            ..TagEditorSettings::default()
        };
        for tag in ["Vip", "Other", "Anything"] {
            assert_eq!(color_for(tag, &settings), "#F59F27");
        }
    }

    #[test]
    fn test_palette_overrides_hash() {
        let settings = dynamic(Some(r##"{"Vip":"#FF0000"}"##));
        assert_eq!(color_for("Vip", &settings), "#FF0000");
        assert_eq!(color_for("Other", &settings), hashed_color("Other"));
        assert!(DYNAMIC_COLORS.contains(&color_for("Other", &settings)));
    }

    #[test]
    fn test_palette_lookup_is_case_sensitive() {
        let settings = dynamic(Some(r##"{"VIP":"#FF0000"}"##));
        assert_eq!(color_for("Vip", &settings), hashed_color("Vip"));
    }

    #[test]
    fn test_color_is_deterministic() {
        let settings = dynamic(None);
        let first = color_for("Stable", &settings);
        for _ in 0..10 {
            assert_eq!(color_for("Stable", &settings), first);
        }
    }

    #[test]
    fn test_invalid_palette_json() {
        assert!(TagPalette::from_json("{").is_none());
        assert!(TagPalette::from_json("[1, 2]").is_none());
        assert!(TagPalette::from_json(r#"{"Vip": 3}"#).is_none());
        assert!(TagPalette::from_json("   ").is_none());
    }

    #[test]
    fn test_empty_palette_object() {
        let palette = TagPalette::from_json("{}").unwrap();
        assert_eq!(palette, TagPalette::default());
        assert_eq!(palette.get("Vip"), None);
    }
}
