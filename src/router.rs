//! Maps key input to popup actions while the popup captures input.
//!
//! | Key | Action | Consumed |
//! |---|---|---|
//! | ↓ press/repeat | next row | yes |
//! | ↑ press/repeat | previous row | yes |
//! | ↓/↑ release | nothing | yes |
//! | enter | commit | yes |
//! | tab | dismiss | no |
//!
//! Everything else passes through to the field.

use crate::key::{Binding, KeyMap};
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// What the popup should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Highlight the next row.
    Next,
    /// Highlight the previous row.
    Previous,
    /// Commit the highlighted row, or hide when none is highlighted.
    Commit,
    /// Hide the popup.
    Dismiss,
    /// Swallow the key without changing state.
    Ignore,
}

/// Outcome of routing one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routed {
    /// Action to run.
    pub action: Action,
    /// Whether the key must not reach the field.
    pub consumed: bool,
}

impl Routed {
    fn consumed(action: Action) -> Self {
        Self {
            action,
            consumed: true,
        }
    }

    fn passed(action: Action) -> Self {
        Self {
            action,
            consumed: false,
        }
    }
}

/// Key bindings of the popup.
#[derive(Debug, Clone)]
pub struct PopupKeyMap {
    /// Highlight the next row.
    pub next: Binding,
    /// Highlight the previous row.
    pub previous: Binding,
    /// Commit the highlighted row.
    pub commit: Binding,
    /// Hide the popup and let the key continue.
    pub dismiss: Binding,
}

impl Default for PopupKeyMap {
    fn default() -> Self {
        Self {
            next: Binding::new(vec![KeyCode::Down]).with_help("↓", "next"),
            previous: Binding::new(vec![KeyCode::Up]).with_help("↑", "previous"),
            commit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "accept"),
            dismiss: Binding::new(vec![KeyCode::Tab]).with_help("tab", "dismiss"),
        }
    }
}

impl KeyMap for PopupKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.previous, &self.commit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.next, &self.previous], vec![&self.commit, &self.dismiss]]
    }
}

impl PopupKeyMap {
    /// Routes a bubbletea key message. These are always key presses.
    pub fn route(&self, msg: &KeyMsg) -> Option<Routed> {
        if self.next.matches(msg) {
            Some(Routed::consumed(Action::Next))
        } else if self.previous.matches(msg) {
            Some(Routed::consumed(Action::Previous))
        } else if self.commit.matches(msg) {
            Some(Routed::consumed(Action::Commit))
        } else if self.dismiss.matches(msg) {
            Some(Routed::passed(Action::Dismiss))
        } else {
            None
        }
    }

    /// Routes a raw key event.
    ///
    /// Navigation only advances on press and repeat; the matching release is
    /// swallowed so a paired down/up delivery never steps twice. Releases of
    /// other keys are not routed.
    pub fn route_event(&self, event: &KeyEvent) -> Option<Routed> {
        if event.kind == KeyEventKind::Release {
            let navigation = self.next.matches_event(event) || self.previous.matches_event(event);
            return navigation.then(|| Routed::consumed(Action::Ignore));
        }
        self.route(&KeyMsg {
            key: event.code,
            modifiers: event.modifiers,
        })
    }
}
