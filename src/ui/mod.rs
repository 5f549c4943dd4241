//! User interface.
//!
//! [`view`] holds the drawing-independent description of the editor; the
//! components draw it with ratatui and route keys back into the control.

mod components;
pub mod theme;
pub mod view;

pub use components::{TagEditor, TagEditorAction, TextInput};
pub use theme::Theme;
pub use view::{Affordance, ChipView, EditorView};
