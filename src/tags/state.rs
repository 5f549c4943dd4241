//! Editor state and its transitions.
//!
//! [`EditorState`] is the whole mutable record behind one tag editor: the
//! tag list plus the [`ViewState`]. Every user or host event maps to one
//! method here and runs to completion before the next one.

use thiserror::Error;
use tracing::debug;

use super::normalize::{normalize_tag, tag_length, TagList, TAG_SEPARATOR};
use crate::config::TagEditorSettings;

/// Rejection of a tag typed by the user.
///
/// The display strings are shown verbatim on the editor's error line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The normalized tag exceeds the configured maximum length.
    #[error("Tag is too long! Maximum {max} characters.")]
    TooLong {
        /// The configured maximum.
        max: usize,
    },

    /// A case-insensitive match is already in the list.
    #[error("Tag already exists.")]
    Duplicate,

    /// The tag contains the field separator and could not be stored.
    #[error("Tags cannot contain commas.")]
    ContainsSeparator,
}

/// Outcome of a mutation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The tag list changed and the host should pull the new value.
    Changed,
    /// Nothing changed.
    Unchanged,
}

impl Mutation {
    /// Check if the tag list changed.
    pub fn is_changed(self) -> bool {
        self == Mutation::Changed
    }
}

/// Expand/collapse flag and pending error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Whether all chips are shown regardless of the collapse limit.
    pub expanded: bool,
    /// Message from the last rejected entry.
    pub error_message: Option<String>,
}

/// Tag list plus view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    tags: TagList,
    view: ViewState,
}

impl EditorState {
    /// Initial state for a freshly loaded field.
    pub fn load(raw: &str, settings: &TagEditorSettings) -> Self {
        let tags = TagList::parse(raw, settings.max_tag_length);
        debug!(count = tags.len(), "Loaded tags");
        Self {
            tags,
            view: ViewState::default(),
        }
    }

    /// Build a state directly from parts.
    pub fn from_parts(tags: TagList, view: ViewState) -> Self {
        Self { tags, view }
    }

    /// The current tags.
    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    /// The current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Whether all chips are shown.
    pub fn is_expanded(&self) -> bool {
        self.view.expanded
    }

    /// Pending error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.view.error_message.as_deref()
    }

    /// The persisted form of the current tags.
    pub fn serialize(&self) -> String {
        self.tags.serialize()
    }

    /// Number of tags hidden behind the collapse limit.
    pub fn hidden_count(&self, settings: &TagEditorSettings) -> usize {
        if self.view.expanded {
            0
        } else {
            self.tags.len().saturating_sub(settings.max_tags_to_show)
        }
    }

    /// Tags currently shown as chips, in order.
    pub fn visible_tags(&self, settings: &TagEditorSettings) -> &[String] {
        let all = self.tags.as_slice();
        if self.view.expanded {
            all
        } else {
            &all[..all.len().min(settings.max_tags_to_show)]
        }
    }

    /// Whether the "less" control applies.
    pub fn can_collapse(&self, settings: &TagEditorSettings) -> bool {
        self.view.expanded && self.tags.len() > settings.max_tags_to_show
    }

    /// Replace the tags with a freshly supplied raw value.
    ///
    /// Collapses when the new list fits under the limit. The pending error
    /// is only cleared when `clear_error` is set.
    pub fn refresh(&mut self, raw: &str, settings: &TagEditorSettings, clear_error: bool) {
        self.tags = TagList::parse(raw, settings.max_tag_length);
        if clear_error {
            self.view.error_message = None;
        }
        self.collapse_if_fits(settings);
        debug!(
            count = self.tags.len(),
            expanded = self.view.expanded,
            "Refreshed tags"
        );
    }

    /// Show every chip. Returns true if the state changed.
    pub fn expand(&mut self, settings: &TagEditorSettings) -> bool {
        if self.view.expanded || self.hidden_count(settings) == 0 {
            return false;
        }
        self.view.expanded = true;
        true
    }

    /// Go back to the collapse limit. Returns true if the state changed.
    pub fn collapse(&mut self, settings: &TagEditorSettings) -> bool {
        if !self.can_collapse(settings) {
            return false;
        }
        self.view.expanded = false;
        true
    }

    /// Add a tag typed by the user.
    ///
    /// Blank input is ignored. A rejected tag leaves the list untouched and
    /// records the error message for display.
    pub fn add_tag(
        &mut self,
        input: &str,
        settings: &TagEditorSettings,
    ) -> Result<Mutation, TagError> {
        self.view.error_message = None;

        let tag = normalize_tag(input);
        if tag.is_empty() {
            return Ok(Mutation::Unchanged);
        }

        let rejection = if tag_length(&tag) > settings.max_tag_length {
            Some(TagError::TooLong {
                max: settings.max_tag_length,
            })
        } else if tag.contains(TAG_SEPARATOR) {
            Some(TagError::ContainsSeparator)
        } else if self.tags.contains(&tag) {
            Some(TagError::Duplicate)
        } else {
            None
        };
        if let Some(err) = rejection {
            debug!(tag = %tag, error = %err, "Rejected tag");
            self.view.error_message = Some(err.to_string());
            return Err(err);
        }

        debug!(tag = %tag, "Added tag");
        self.tags.push(tag);
        Ok(Mutation::Changed)
    }

    /// Remove a tag, matching case-insensitively.
    pub fn remove_tag(&mut self, tag: &str, settings: &TagEditorSettings) -> Mutation {
        self.view.error_message = None;
        if self.tags.remove(tag) == 0 {
            return Mutation::Unchanged;
        }
        debug!(tag = %tag, "Removed tag");
        self.collapse_if_fits(settings);
        Mutation::Changed
    }

    fn collapse_if_fits(&mut self, settings: &TagEditorSettings) {
        if self.view.expanded && self.tags.len() <= settings.max_tags_to_show {
            self.view.expanded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_len: usize, max_show: usize) -> TagEditorSettings {
        TagEditorSettings {
            max_tag_length: max_len,
            max_tags_to_show: max_show,
            ..TagEditorSettings::default()
        }
    }

    fn tags(state: &EditorState) -> Vec<&str> {
        state.tags().iter().collect()
    }

    #[test]
    fn test_load_starts_collapsed_without_error() {
        let state = EditorState::load("a,b", &TagEditorSettings::default());
        assert!(!state.is_expanded());
        assert!(state.error_message().is_none());
        assert_eq!(tags(&state), vec!["A", "B"]);
    }

    #[test]
    fn test_visible_and_hidden_counts() {
        let s = settings(20, 2);
        let mut state = EditorState::load("A,B,C,D", &s);

        assert_eq!(state.visible_tags(&s), ["A", "B"]);
        assert_eq!(state.hidden_count(&s), 2);
        assert!(!state.can_collapse(&s));

        assert!(state.expand(&s));
        assert_eq!(state.visible_tags(&s).len(), 4);
        assert_eq!(state.hidden_count(&s), 0);
        assert!(state.can_collapse(&s));

        assert!(state.collapse(&s));
        assert!(!state.is_expanded());
    }

    #[test]
    fn test_expand_without_hidden_is_noop() {
        let s = settings(20, 5);
        let mut state = EditorState::load("A,B", &s);
        assert!(!state.expand(&s));
        assert!(!state.is_expanded());
    }

    #[test]
    fn test_collapse_when_not_expanded_is_noop() {
        let s = settings(20, 1);
        let mut state = EditorState::load("A,B", &s);
        assert!(!state.collapse(&s));
    }

    #[test]
    fn test_add_tag_appends_normalized() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha", &s);
        assert_eq!(state.add_tag("  bETA ", &s), Ok(Mutation::Changed));
        assert_eq!(tags(&state), vec!["Alpha", "Beta"]);
        assert_eq!(state.serialize(), "Alpha,Beta");
    }

    #[test]
    fn test_add_blank_is_ignored() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha", &s);
        assert_eq!(state.add_tag("   ", &s), Ok(Mutation::Unchanged));
        assert_eq!(tags(&state), vec!["Alpha"]);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("New tag", &s);
        assert_eq!(state.add_tag("new tag", &s), Err(TagError::Duplicate));
        assert_eq!(state.error_message(), Some("Tag already exists."));
        assert_eq!(tags(&state), vec!["New tag"]);
    }

    #[test]
    fn test_add_too_long_rejected() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("", &s);
        let input = "a".repeat(25);
        assert_eq!(state.add_tag(&input, &s), Err(TagError::TooLong { max: 20 }));
        assert_eq!(
            state.error_message(),
            Some("Tag is too long! Maximum 20 characters.")
        );
        assert!(state.tags().is_empty());
    }

    #[test]
    fn test_add_at_length_limit_accepted() {
        let s = settings(5, 10);
        let mut state = EditorState::default();
        assert_eq!(state.add_tag("abcde", &s), Ok(Mutation::Changed));
    }

    #[test]
    fn test_add_with_comma_rejected() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::default();
        assert_eq!(state.add_tag("a,b", &s), Err(TagError::ContainsSeparator));
        assert_eq!(state.error_message(), Some("Tags cannot contain commas."));
        assert!(state.tags().is_empty());
    }

    #[test]
    fn test_next_attempt_clears_error() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha", &s);
        let _ = state.add_tag("alpha", &s);
        assert!(state.error_message().is_some());

        assert_eq!(state.add_tag("", &s), Ok(Mutation::Unchanged));
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_added_tag_keeps_position_when_hidden() {
        let s = settings(20, 2);
        let mut state = EditorState::load("A,B", &s);
        state.add_tag("c", &s).unwrap();
        assert_eq!(tags(&state), vec!["A", "B", "C"]);
        assert_eq!(state.visible_tags(&s), ["A", "B"]);
        assert_eq!(state.hidden_count(&s), 1);
    }

    #[test]
    fn test_remove_tag_case_insensitive() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha,Beta", &s);
        assert_eq!(state.remove_tag("BETA", &s), Mutation::Changed);
        assert_eq!(tags(&state), vec!["Alpha"]);
    }

    #[test]
    fn test_remove_missing_tag_is_unchanged() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha", &s);
        assert_eq!(state.remove_tag("Gamma", &s), Mutation::Unchanged);
    }

    #[test]
    fn test_remove_clears_error() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha,Beta", &s);
        let _ = state.add_tag("alpha", &s);
        state.remove_tag("Beta", &s);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_remove_collapses_when_list_fits() {
        let s = settings(20, 2);
        let mut state = EditorState::load("A,B,C", &s);
        state.expand(&s);
        state.remove_tag("C", &s);
        assert!(!state.is_expanded());
    }

    #[test]
    fn test_refresh_collapses_when_list_fits() {
        let s = settings(20, 2);
        let mut state = EditorState::load("A,B,C,D", &s);
        state.expand(&s);

        state.refresh("A,B", &s, true);
        assert!(!state.is_expanded());
    }

    #[test]
    fn test_refresh_stays_expanded_when_list_overflows() {
        let s = settings(20, 2);
        let mut state = EditorState::load("A,B,C,D", &s);
        state.expand(&s);

        state.refresh("A,B,C", &s, true);
        assert!(state.is_expanded());
    }

    #[test]
    fn test_refresh_error_policy() {
        let s = TagEditorSettings::default();
        let mut state = EditorState::load("Alpha", &s);

        let _ = state.add_tag("alpha", &s);
        state.refresh("Beta", &s, false);
        assert_eq!(state.error_message(), Some("Tag already exists."));

        state.refresh("Beta", &s, true);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_mutation_is_changed() {
        assert!(Mutation::Changed.is_changed());
        assert!(!Mutation::Unchanged.is_changed());
    }
}
