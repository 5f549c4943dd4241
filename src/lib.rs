//! tag-chips - edit a comma-separated tag field as colored chips.
//!
//! The core ([`tags`]) parses a stored value into unique sentence-case tags,
//! assigns each a color and tracks the expand/collapse and error state. The
//! [`control`] module wraps it in the four-call lifecycle a form host
//! drives, and [`app`] is a terminal host for it.
//!
//! ```
//! use tag_chips::config::TagEditorSettings;
//! use tag_chips::tags::EditorState;
//!
//! let settings = TagEditorSettings::default();
//! let mut state = EditorState::load("Test,Vip,vip,Another", &settings);
//! assert_eq!(state.serialize(), "Test,Vip,Another");
//!
//! assert!(state.add_tag("vip", &settings).is_err());
//! assert_eq!(state.error_message(), Some("Tag already exists."));
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod logging;
pub mod tags;
pub mod ui;
