//! Tag editor core.
//!
//! Everything in here is independent of the terminal and of any host: feed
//! it raw strings and settings, get back tags, colors and state transitions.

mod color;
mod normalize;
mod state;

pub use color::{color_for, hashed_color, tag_hash, TagPalette, DYNAMIC_COLORS};
pub use normalize::{normalize_tag, same_tag, tag_length, TagList, TAG_SEPARATOR};
pub use state::{EditorState, Mutation, TagError, ViewState};
