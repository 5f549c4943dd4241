//! Tag editor component.
//!
//! Draws an [`EditorView`] as a row of colored chips with "+N"/"less"
//! controls, a text entry for new tags and an error line, and turns
//! keyboard input into activations of the view's affordances.
//!
//! Keys:
//! - Tab / Shift-Tab (or Left / Right away from the entry): move focus
//! - Enter: commit the entry, or activate the focused control
//! - Space / Delete: activate the focused chip or control
//! - Backspace on an empty entry: focus the last chip
//! - Esc: close

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::trace;

use super::input::TextInput;
use crate::control::TagEditorControl;
use crate::ui::theme::{chip_background, chip_foreground, Theme};
use crate::ui::view::{Affordance, EditorView};

/// Action resulting from tag editor input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEditorAction {
    /// The tag list changed.
    Changed,
    /// The user asked to leave the editor.
    Close,
}

/// Terminal tag editor.
#[derive(Debug)]
pub struct TagEditor {
    /// Field label shown in the border.
    title: String,
    /// Entry for new tags.
    input: TextInput,
    /// Focused affordance.
    focus: Affordance,
    theme: Theme,
}

impl TagEditor {
    /// Create an editor with the given field label.
    pub fn new(title: impl Into<String>) -> Self {
        let mut input = TextInput::new();
        input.set_placeholder("Type a tag and press Enter");
        Self {
            title: title.into(),
            input,
            focus: Affordance::Entry,
            theme: Theme::default(),
        }
    }

    /// Current entry text.
    pub fn entry(&self) -> &str {
        self.input.value()
    }

    /// The focused affordance, resolved against a view.
    ///
    /// Falls back to the entry, then to the first affordance, when the
    /// remembered focus no longer exists.
    pub fn focused(&self, view: &EditorView) -> Option<Affordance> {
        let affordances = view.affordances();
        self.focus_index(&affordances)
            .map(|index| affordances[index].clone())
    }

    fn focus_index(&self, affordances: &[Affordance]) -> Option<usize> {
        if affordances.is_empty() {
            return None;
        }
        affordances
            .iter()
            .position(|a| *a == self.focus)
            .or_else(|| affordances.iter().position(|a| *a == Affordance::Entry))
            .or(Some(0))
    }

    fn move_focus(&mut self, affordances: &[Affordance], forward: bool) {
        let Some(current) = self.focus_index(affordances) else {
            return;
        };
        let len = affordances.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus = affordances[next].clone();
    }

    /// Handle keyboard input against a control.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        control: &mut TagEditorControl,
    ) -> Option<TagEditorAction> {
        let affordances = control.view().affordances();
        let focused = self
            .focus_index(&affordances)
            .map(|index| affordances[index].clone());
        let on_entry = focused == Some(Affordance::Entry);

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(TagEditorAction::Close),
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.move_focus(&affordances, true);
                None
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.move_focus(&affordances, false);
                None
            }
            (KeyCode::Left, _) if !on_entry => {
                self.move_focus(&affordances, false);
                None
            }
            (KeyCode::Right, _) if !on_entry => {
                self.move_focus(&affordances, true);
                None
            }
            (KeyCode::Enter, _) => {
                let target = focused?;
                self.activate(&target, control)
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) | (KeyCode::Delete, _) if !on_entry => {
                let target = focused?;
                self.activate(&target, control)
            }
            (KeyCode::Backspace, _) if on_entry && self.input.is_empty() => {
                if let Some(Affordance::Remove(tag)) = affordances
                    .iter()
                    .rev()
                    .find(|a| matches!(a, Affordance::Remove(_)))
                {
                    self.focus = Affordance::Remove(tag.clone());
                }
                None
            }
            _ if on_entry => {
                self.input.handle_input(key);
                None
            }
            _ => None,
        }
    }

    fn activate(
        &mut self,
        target: &Affordance,
        control: &mut TagEditorControl,
    ) -> Option<TagEditorAction> {
        trace!(?target, "Activating affordance");
        let mutation = control.activate(target, self.input.value());
        match target {
            Affordance::Entry => self.input.clear(),
            Affordance::Remove(_) => self.focus = Affordance::Entry,
            Affordance::Expand => self.focus = Affordance::Collapse,
            Affordance::Collapse => self.focus = Affordance::Expand,
        }
        mutation.is_changed().then_some(TagEditorAction::Changed)
    }

    /// Render the editor for a view.
    pub fn render(&self, frame: &mut Frame, area: Rect, view: &EditorView) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.fg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Min(1)];
        if view.show_entry {
            constraints.push(Constraint::Length(3));
        }
        if view.error.is_some() {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let focused = self.focused(view);
        let mut next = 0;
        self.render_chips(frame, chunks[next], view, focused.as_ref());
        next += 1;

        if view.show_entry {
            self.input.render(
                frame,
                chunks[next],
                "New tag",
                focused == Some(Affordance::Entry),
            );
            next += 1;
        }

        if let Some(error) = &view.error {
            let line = Paragraph::new(error.as_str()).style(Style::default().fg(self.theme.error));
            frame.render_widget(line, chunks[next]);
            next += 1;
        }

        self.render_help(frame, chunks[next], view);
    }

    fn render_chips(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: &EditorView,
        focused: Option<&Affordance>,
    ) {
        if view.chips.is_empty() {
            let empty = Paragraph::new("No tags").style(Style::default().fg(self.theme.muted));
            frame.render_widget(empty, area);
            return;
        }

        let mut spans: Vec<Span> = Vec::new();
        for chip in &view.chips {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            let bg = chip_background(&chip.color);
            let mut style = Style::default().fg(chip_foreground(bg)).bg(bg);
            let is_focused =
                matches!(focused, Some(Affordance::Remove(tag)) if *tag == chip.text);
            if is_focused {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            let label = if chip.removable {
                format!(" {} × ", chip.text)
            } else {
                format!(" {} ", chip.text)
            };
            spans.push(Span::styled(label, style));
        }

        if let Some(more) = view.more_label() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                more,
                self.control_style(focused == Some(&Affordance::Expand)),
            ));
        }
        if view.show_less {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                "less",
                self.control_style(focused == Some(&Affordance::Collapse)),
            ));
        }

        let chips = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
        frame.render_widget(chips, area);
    }

    fn control_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.theme.highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.theme.highlight)
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect, view: &EditorView) {
        let key = Style::default().fg(self.theme.highlight);
        let mut spans = vec![Span::styled("Tab", key), Span::raw(": focus  ")];
        if view.show_entry {
            spans.push(Span::styled("Enter", key));
            spans.push(Span::raw(": add/activate  "));
        } else {
            spans.push(Span::styled("Enter", key));
            spans.push(Span::raw(": activate  "));
        }
        spans.push(Span::styled("Esc", key));
        spans.push(Span::raw(": close"));
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().fg(self.theme.muted)),
            area,
        );
    }
}
