//! Key bindings.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the help text shown for it. Bindings match both bubbletea-rs
//! [`KeyMsg`]s and raw crossterm [`KeyEvent`]s.
//!
//! ```rust
//! use bubbletea_suggest::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = Binding::new(vec![KeyCode::Down]).with_help("↓", "next suggestion");
//! let msg = KeyMsg { key: KeyCode::Down, modifiers: KeyModifiers::NONE };
//! assert!(next.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key code together with its required modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// Key code.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // shift is implied by the character itself for printable keys
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        self.code == code && self.modifiers == modifiers
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"↓"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of key presses that trigger one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for `keys`.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Disables or re-enables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding can match.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.matches_code(msg.key, msg.modifiers)
    }

    /// Whether `event` triggers this binding, regardless of press/release.
    pub fn matches_event(&self, event: &KeyEvent) -> bool {
        self.matches_code(event.code, event.modifiers)
    }

    fn matches_code(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(code, modifiers))
    }
}

/// Components expose their bindings for help views through this trait.
pub trait KeyMap {
    /// Bindings for the compact help line.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
