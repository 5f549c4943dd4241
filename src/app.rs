//! Terminal form host.
//!
//! [`App`] plays the part of the form framework: it owns the bound field
//! value and the control options, drives the [`TagEditorControl`] through
//! its lifecycle, pulls the output whenever the control reports a change,
//! and feeds the new value back in as a refresh.

use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use crate::config::{Config, ControlProperties};
use crate::control::{ControlMode, FieldControl, TagEditorControl};
use crate::error::{AppError, Result};
use crate::events::{Event, EventHandler};
use crate::ui::{TagEditor, TagEditorAction};

/// Restores the terminal when dropped, including on panic.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        Ok(Self { active: true })
    }

    fn restore(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            disable_raw_mode()?;
            execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        }
    }
}

/// The terminal host application.
pub struct App {
    control: TagEditorControl,
    editor: TagEditor,
    /// Host-side copy of the bound field and options.
    properties: ControlProperties,
    /// Command-line overrides, re-applied on every reload.
    overrides: ControlProperties,
    mode: ControlMode,
    config_path: Option<PathBuf>,
    /// Set by the control's output-changed callback.
    output_changed: Rc<Cell<bool>>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    /// Create the host and initialize the control.
    ///
    /// `overrides` win over the config file's `[control]` table.
    pub fn new(
        config: Config,
        overrides: ControlProperties,
        mode: ControlMode,
        config_path: Option<PathBuf>,
    ) -> Self {
        let mut properties = config.control;
        properties.merge(overrides.clone());

        let output_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&output_changed);

        let mut control = TagEditorControl::new(config.behavior);
        control.init(&properties, mode, Box::new(move || flag.set(true)));

        Self {
            control,
            editor: TagEditor::new("Tags"),
            properties,
            overrides,
            mode,
            config_path,
            output_changed,
            status: None,
            should_quit: false,
        }
    }

    /// The bound field value as the host currently holds it.
    pub fn field_value(&self) -> &str {
        self.properties.raw_value()
    }

    /// The control being hosted.
    pub fn control(&self) -> &TagEditorControl {
        &self.control
    }

    /// Whether the loop should end.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Last status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Process one event to completion.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                    self.editor.handle_input(key, &mut self.control);
                }
            }
            Event::Resize(..) | Event::Tick => {}
        }
        self.sync_output();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => self.reload(),
            _ => {
                if let Some(TagEditorAction::Close) =
                    self.editor.handle_input(key, &mut self.control)
                {
                    self.should_quit = true;
                }
            }
        }
    }

    /// Pull the control's output after it reported a change, then refresh it
    /// with the persisted value the way a form host does.
    fn sync_output(&mut self) {
        if !self.output_changed.replace(false) {
            return;
        }
        let output = self.control.get_output();
        debug!(value = %output, "Persisting field value");
        self.properties.value = Some(output);
        self.control.update_view(&self.properties, self.mode);
        self.status = None;
    }

    /// Reload options from the config file and refresh the control.
    ///
    /// The bound value stays as the host holds it.
    fn reload(&mut self) {
        let loaded = match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        match loaded {
            Ok(config) => {
                let value = self.properties.value.take();
                let mut properties = config.control;
                properties.merge(self.overrides.clone());
                properties.value = value;
                self.properties = properties;
                self.control.update_view(&self.properties, self.mode);
                self.status = Some("Configuration reloaded".to_string());
                info!("Configuration reloaded");
            }
            Err(e) => {
                warn!(error = %e, "Failed to reload configuration");
                self.status = Some(AppError::from(e).user_message());
            }
        }
    }

    /// Draw the host screen.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(1)])
            .split(frame.area());

        self.editor.render(frame, chunks[0], &self.control.view());

        let mut spans = vec![
            Span::styled("Value: ", Style::default().fg(Color::Cyan)),
            Span::raw(self.field_value().to_string()),
        ];
        if let Some(status) = &self.status {
            spans.push(Span::styled(
                format!("  {}", status),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
    }

    /// Run the editor in the terminal until the user closes it.
    ///
    /// Returns the final field value.
    pub fn run(mut self) -> Result<String> {
        let mut guard = TerminalGuard::new()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(|e| AppError::terminal(e.to_string()))?;
        let events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            let event = events.next()?;
            self.handle_event(event);
        }

        guard.restore()?;
        Ok(self.finish())
    }

    /// Tear the control down and return the final value.
    pub fn finish(mut self) -> String {
        let output = self.control.get_output();
        self.control.destroy();
        output
    }
}
