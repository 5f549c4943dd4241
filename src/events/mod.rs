//! Event handling for the terminal host.
//!
//! Terminal input is polled and converted into [`Event`]s that the app loop
//! processes one at a time.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// An event for the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Bracketed paste.
    Paste(String),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
