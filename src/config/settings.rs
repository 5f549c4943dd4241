//! Resolved tag editor settings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ControlProperties;
use crate::tags::TagPalette;

/// Default maximum tag length in characters.
pub const DEFAULT_MAX_TAG_LENGTH: usize = 20;

/// Default number of chips shown before collapsing.
pub const DEFAULT_MAX_TAGS_TO_SHOW: usize = 10;

/// Default chip color.
pub const DEFAULT_TAG_COLOR: &str = "#F59F27";

/// Read-only configuration snapshot for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditorSettings {
    /// Maximum tag length in characters. Always positive.
    pub max_tag_length: usize,
    /// Collapse limit. Always positive.
    pub max_tags_to_show: usize,
    /// Static chip color.
    pub default_tag_color: String,
    /// Whether chips get per-tag colors.
    pub use_dynamic_colors: bool,
    /// Explicit tag colors, if a valid palette was configured.
    pub palette: Option<TagPalette>,
}

impl TagEditorSettings {
    /// Resolve host properties into a usable snapshot.
    ///
    /// Missing or non-positive limits fall back to their defaults, a blank
    /// color falls back to [`DEFAULT_TAG_COLOR`], and a palette that is not
    /// valid JSON is treated as absent.
    pub fn from_properties(props: &ControlProperties) -> Self {
        let settings = Self {
            max_tag_length: positive_or(props.max_tag_length, DEFAULT_MAX_TAG_LENGTH),
            max_tags_to_show: positive_or(props.max_tags_to_show, DEFAULT_MAX_TAGS_TO_SHOW),
            default_tag_color: props
                .default_tag_color
                .as_deref()
                .map(str::trim)
                .filter(|color| !color.is_empty())
                .unwrap_or(DEFAULT_TAG_COLOR)
                .to_string(),
            use_dynamic_colors: props.use_dynamic_colors.unwrap_or(false),
            palette: props
                .custom_tag_palette
                .as_deref()
                .and_then(TagPalette::from_json),
        };
        debug!(
            max_tag_length = settings.max_tag_length,
            max_tags_to_show = settings.max_tags_to_show,
            dynamic = settings.use_dynamic_colors,
            palette = settings.palette.is_some(),
            "Resolved tag editor settings"
        );
        settings
    }
}

impl Default for TagEditorSettings {
    fn default() -> Self {
        Self {
            max_tag_length: DEFAULT_MAX_TAG_LENGTH,
            max_tags_to_show: DEFAULT_MAX_TAGS_TO_SHOW,
            default_tag_color: DEFAULT_TAG_COLOR.to_string(),
            use_dynamic_colors: false,
            palette: None,
        }
    }
}

fn positive_or(value: Option<i64>, default: usize) -> usize {
    value
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Behavior switches that are not part of the host property set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSettings {
    /// Clear a pending error message when the host refreshes the field.
    ///
    /// Turning this off keeps a stale validation message on screen across
    /// refreshes, matching older deployments.
    pub clear_error_on_refresh: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            clear_error_on_refresh: true,
        }
    }
}
