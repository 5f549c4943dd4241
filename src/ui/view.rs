//! Render description of a tag editor.
//!
//! [`EditorView`] is what the editor looks like, independent of how it is
//! drawn: the chips, the "+N"/"less" controls, the entry box and the error
//! line. Each interactive part is exposed as an [`Affordance`] that maps back
//! to exactly one state transition.

use crate::config::TagEditorSettings;
use crate::tags::{color_for, EditorState};

/// One chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    /// Tag text.
    pub text: String,
    /// Color string, as configured (`#RRGGBB` or a color name).
    pub color: String,
    /// Whether the chip offers a remove control.
    pub removable: bool,
}

/// An interactive part of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    /// Remove the given tag.
    Remove(String),
    /// The "+N" control: show every chip.
    Expand,
    /// The "less" control: back to the collapse limit.
    Collapse,
    /// The text entry: commit its content as a new tag.
    Entry,
}

/// Everything needed to draw a tag editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorView {
    /// Chips to draw, in order.
    pub chips: Vec<ChipView>,
    /// Chips hidden behind the "+N" control. Zero means no control.
    pub hidden_count: usize,
    /// Whether the "less" control is shown.
    pub show_less: bool,
    /// Whether the text entry is shown.
    pub show_entry: bool,
    /// Error line, if any.
    pub error: Option<String>,
}

impl EditorView {
    /// Describe the editor for the given state.
    pub fn build(
        state: &EditorState,
        settings: &TagEditorSettings,
        editable: bool,
        visible: bool,
    ) -> Self {
        let chips = state
            .visible_tags(settings)
            .iter()
            .map(|tag| ChipView {
                text: tag.clone(),
                color: color_for(tag, settings).to_string(),
                removable: editable,
            })
            .collect();

        Self {
            chips,
            hidden_count: state.hidden_count(settings),
            show_less: state.can_collapse(settings),
            show_entry: editable && visible,
            error: if editable {
                state.error_message().map(str::to_string)
            } else {
                None
            },
        }
    }

    /// Label of the "+N" control, if shown.
    pub fn more_label(&self) -> Option<String> {
        (self.hidden_count > 0).then(|| format!("+{}", self.hidden_count))
    }

    /// Interactive parts in display order.
    pub fn affordances(&self) -> Vec<Affordance> {
        let mut affordances: Vec<Affordance> = self
            .chips
            .iter()
            .filter(|chip| chip.removable)
            .map(|chip| Affordance::Remove(chip.text.clone()))
            .collect();
        if self.hidden_count > 0 {
            affordances.push(Affordance::Expand);
        }
        if self.show_less {
            affordances.push(Affordance::Collapse);
        }
        if self.show_entry {
            affordances.push(Affordance::Entry);
        }
        affordances
    }
}
