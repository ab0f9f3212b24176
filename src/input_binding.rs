//! Turns changes of the bound field into signals for the popup.
//!
//! The binding keeps a snapshot of the field's text and focus. After the
//! field handles a message (or gains/loses focus) the popup calls
//! [`InputBinding::observe`], which reports what changed since the snapshot.
//! Text the popup writes itself is folded into the snapshot with
//! [`InputBinding::absorb`] so it never looks like user input.

use crate::field::InputField;

/// A change of the bound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSignal {
    /// The user changed the text.
    TextChanged(String),
    /// The field gained focus.
    FocusGained,
    /// The field lost focus.
    FocusLost,
}

/// Snapshot-based observer of an [`InputField`].
#[derive(Debug, Clone, Default)]
pub struct InputBinding {
    text: String,
    focused: bool,
}

impl InputBinding {
    /// Starts observing `field` from its current state.
    pub fn new<F: InputField>(field: &F) -> Self {
        Self {
            text: field.value(),
            focused: field.focused(),
        }
    }

    /// Text as of the last observation.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reports changes since the last observation, focus changes first.
    ///
    /// Each change is reported once; observing an unchanged field yields
    /// nothing.
    pub fn observe<F: InputField>(&mut self, field: &F) -> Vec<FieldSignal> {
        let mut signals = Vec::new();

        let focused = field.focused();
        if focused != self.focused {
            self.focused = focused;
            signals.push(if focused {
                FieldSignal::FocusGained
            } else {
                FieldSignal::FocusLost
            });
        }

        let text = field.value();
        if text != self.text {
            self.text = text.clone();
            signals.push(FieldSignal::TextChanged(text));
        }

        signals
    }

    /// Accepts the field's current text without reporting it.
    pub fn absorb<F: InputField>(&mut self, field: &F) {
        self.text = field.value();
    }
}
