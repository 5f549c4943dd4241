//! Reusable UI components.

mod input;
mod tag_editor;

pub use input::TextInput;
pub use tag_editor::{TagEditor, TagEditorAction};
