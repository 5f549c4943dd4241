//! Raw control properties as supplied by the host.

use serde::{Deserialize, Serialize};

/// The six named options a host binds to the tag editor.
///
/// Every value is optional and loosely typed: hosts routinely hand over
/// missing or nonsensical values, and resolution into a usable snapshot is
/// left to [`TagEditorSettings::from_properties`](super::TagEditorSettings::from_properties).
/// Field names accept both snake case and the camel case used by form
/// manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlProperties {
    /// The bound field's raw comma-separated value.
    #[serde(alias = "tagsValue")]
    pub value: Option<String>,
    /// Chip color used when dynamic colors are off.
    #[serde(alias = "defaultTagColor")]
    pub default_tag_color: Option<String>,
    /// Whether chips get per-tag colors.
    #[serde(alias = "useDynamicColors")]
    pub use_dynamic_colors: Option<bool>,
    /// JSON object mapping tag text to a color.
    #[serde(alias = "customTagPalette")]
    pub custom_tag_palette: Option<String>,
    /// Number of chips shown before the rest collapse behind "+N".
    #[serde(alias = "maxTagsToShow")]
    pub max_tags_to_show: Option<i64>,
    /// Maximum tag length in characters.
    #[serde(alias = "maxTagLength")]
    pub max_tag_length: Option<i64>,
}

impl ControlProperties {
    /// Create properties bound to the given raw value.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// The bound raw value, or an empty string when the field is unset.
    pub fn raw_value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Overlay every property set in `other` on top of `self`.
    pub fn merge(&mut self, other: ControlProperties) {
        if other.value.is_some() {
            self.value = other.value;
        }
        if other.default_tag_color.is_some() {
            self.default_tag_color = other.default_tag_color;
        }
        if other.use_dynamic_colors.is_some() {
            self.use_dynamic_colors = other.use_dynamic_colors;
        }
        if other.custom_tag_palette.is_some() {
            self.custom_tag_palette = other.custom_tag_palette;
        }
        if other.max_tags_to_show.is_some() {
            self.max_tags_to_show = other.max_tags_to_show;
        }
        if other.max_tag_length.is_some() {
            self.max_tag_length = other.max_tag_length;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_defaults_to_empty() {
        assert_eq!(ControlProperties::default().raw_value(), "");
        assert_eq!(ControlProperties::with_value("a,b").raw_value(), "a,b");
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut base = ControlProperties {
            value: Some("a".to_string()),
            max_tag_length: Some(15),
            ..ControlProperties::default()
        };
        base.merge(ControlProperties {
            max_tags_to_show: Some(3),
            ..ControlProperties::default()
        });

        assert_eq!(base.value.as_deref(), Some("a"));
        assert_eq!(base.max_tag_length, Some(15));
        assert_eq!(base.max_tags_to_show, Some(3));
    }

    #[test]
    fn test_deserialize_manifest_names() {
        let props: ControlProperties = toml::from_str(
            r##"
            tagsValue = "Test,Vip"
            defaultTagColor = "#000000"
            useDynamicColors = true
            customTagPalette = '{"Vip":"#FF0000"}'
            maxTagsToShow = 4
            maxTagLength = 12
            "##,
        )
        .unwrap();

        assert_eq!(props.raw_value(), "Test,Vip");
        assert_eq!(props.default_tag_color.as_deref(), Some("#000000"));
        assert_eq!(props.use_dynamic_colors, Some(true));
        assert_eq!(props.custom_tag_palette.as_deref(), Some(r##"{"Vip":"#FF0000"}"##));
        assert_eq!(props.max_tags_to_show, Some(4));
        assert_eq!(props.max_tag_length, Some(12));
    }

    #[test]
    fn test_deserialize_snake_case_names() {
        let props: ControlProperties =
            toml::from_str("value = \"x\"\nmax_tag_length = 5\n").unwrap();
        assert_eq!(props.raw_value(), "x");
        assert_eq!(props.max_tag_length, Some(5));
    }
}
