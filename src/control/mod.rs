//! Host lifecycle for the tag editor.
//!
//! A form host drives a field control through four calls: [`FieldControl::init`]
//! once, [`FieldControl::update_view`] whenever the bound value or options
//! change, [`FieldControl::get_output`] whenever it wants to persist, and
//! [`FieldControl::destroy`] at the end. The control tells the host that it
//! has something new to persist through the [`OutputChanged`] callback.

use tracing::{debug, info};

use crate::config::{BehaviorSettings, ControlProperties, TagEditorSettings};
use crate::tags::{EditorState, Mutation};
use crate::ui::{Affordance, EditorView};

/// Callback telling the host to pull [`FieldControl::get_output`].
pub type OutputChanged = Box<dyn FnMut()>;

/// How the host presents the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMode {
    /// Whether the user may change the value.
    pub editable: bool,
    /// Whether the control is visible on the form.
    pub visible: bool,
}

impl Default for ControlMode {
    fn default() -> Self {
        Self {
            editable: true,
            visible: true,
        }
    }
}

/// Lifecycle a form host drives.
pub trait FieldControl {
    /// First configuration. Parses the bound value and resets view state.
    fn init(&mut self, props: &ControlProperties, mode: ControlMode, notify: OutputChanged);

    /// New bound value or options from the host.
    fn update_view(&mut self, props: &ControlProperties, mode: ControlMode);

    /// Current value in persisted form.
    fn get_output(&self) -> String;

    /// Release the control. No notifications are sent afterwards.
    fn destroy(&mut self);
}

/// The tag editor as a field control.
pub struct TagEditorControl {
    state: EditorState,
    settings: TagEditorSettings,
    behavior: BehaviorSettings,
    mode: ControlMode,
    notify: Option<OutputChanged>,
}

impl TagEditorControl {
    /// Create an uninitialized control.
    pub fn new(behavior: BehaviorSettings) -> Self {
        Self {
            state: EditorState::default(),
            settings: TagEditorSettings::default(),
            behavior,
            mode: ControlMode::default(),
            notify: None,
        }
    }

    /// The current editor state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The settings from the last init or refresh.
    pub fn settings(&self) -> &TagEditorSettings {
        &self.settings
    }

    /// The presentation mode from the last init or refresh.
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Describe the editor for drawing.
    pub fn view(&self) -> EditorView {
        EditorView::build(
            &self.state,
            &self.settings,
            self.mode.editable,
            self.mode.visible,
        )
    }

    /// Add a tag typed by the user.
    ///
    /// Rejections end up on the error line, not in the return value.
    pub fn add_tag(&mut self, input: &str) -> Mutation {
        if !self.mode.editable {
            return Mutation::Unchanged;
        }
        let mutation = self
            .state
            .add_tag(input, &self.settings)
            .unwrap_or(Mutation::Unchanged);
        self.after_mutation(mutation)
    }

    /// Remove a tag.
    pub fn remove_tag(&mut self, tag: &str) -> Mutation {
        if !self.mode.editable {
            return Mutation::Unchanged;
        }
        let mutation = self.state.remove_tag(tag, &self.settings);
        self.after_mutation(mutation)
    }

    /// Show every chip.
    pub fn expand(&mut self) -> bool {
        self.state.expand(&self.settings)
    }

    /// Back to the collapse limit.
    pub fn collapse(&mut self) -> bool {
        self.state.collapse(&self.settings)
    }

    /// Run the transition behind an affordance.
    ///
    /// `entry` is the text entry's content and is only used by
    /// [`Affordance::Entry`].
    pub fn activate(&mut self, affordance: &Affordance, entry: &str) -> Mutation {
        match affordance {
            Affordance::Remove(tag) => self.remove_tag(tag),
            Affordance::Expand => {
                self.expand();
                Mutation::Unchanged
            }
            Affordance::Collapse => {
                self.collapse();
                Mutation::Unchanged
            }
            Affordance::Entry => self.add_tag(entry),
        }
    }

    fn after_mutation(&mut self, mutation: Mutation) -> Mutation {
        if mutation.is_changed() {
            if let Some(notify) = self.notify.as_mut() {
                notify();
            }
        }
        mutation
    }
}

impl Default for TagEditorControl {
    fn default() -> Self {
        Self::new(BehaviorSettings::default())
    }
}

impl FieldControl for TagEditorControl {
    fn init(&mut self, props: &ControlProperties, mode: ControlMode, notify: OutputChanged) {
        self.settings = TagEditorSettings::from_properties(props);
        self.mode = mode;
        self.state = EditorState::load(props.raw_value(), &self.settings);
        self.notify = Some(notify);
        info!(count = self.state.tags().len(), "Tag editor initialized");
    }

    fn update_view(&mut self, props: &ControlProperties, mode: ControlMode) {
        self.settings = TagEditorSettings::from_properties(props);
        self.mode = mode;
        self.state.refresh(
            props.raw_value(),
            &self.settings,
            self.behavior.clear_error_on_refresh,
        );
    }

    fn get_output(&self) -> String {
        self.state.serialize()
    }

    fn destroy(&mut self) {
        self.notify = None;
        debug!("Tag editor destroyed");
    }
}
