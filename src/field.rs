//! The text field a popup is bound to.
//!
//! [`InputField`] is what the popup needs from a field: read and replace the
//! text, place a selection, and forward input. [`TextField`] is a single-line
//! implementation whose selection behaves like a desktop text box: typing
//! replaces the selected text, so after a suggestion is highlighted the user
//! can keep typing to refine it.

use crate::key::{Binding, KeyPress};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lipgloss_extras::prelude::*;
use std::ops::Range;

/// Operations the popup performs on its bound field.
///
/// Ranges and positions are measured in `char`s.
pub trait InputField: Component + Send + 'static {
    /// Current text.
    fn value(&self) -> String;
    /// Replaces the text, collapsing any selection and moving the cursor to
    /// the end.
    fn set_value(&mut self, value: &str);
    /// Selects `range`, clamped to the text. The cursor sits at its end.
    fn select(&mut self, range: Range<usize>);
    /// Moves the cursor to the end and clears the selection.
    fn move_to_end(&mut self);
    /// Handles an input message.
    fn update(&mut self, msg: Msg) -> Option<Cmd>;
    /// Renders the field.
    fn view(&self) -> String;
}

/// Key bindings for [`TextField`].
#[derive(Debug, Clone)]
pub struct FieldKeyMap {
    /// Move one character right.
    pub character_forward: Binding,
    /// Move one character left.
    pub character_backward: Binding,
    /// Delete the character before the cursor.
    pub delete_character_backward: Binding,
    /// Delete the character under the cursor.
    pub delete_character_forward: Binding,
    /// Delete from the start of the line to the cursor.
    pub delete_before_cursor: Binding,
    /// Delete from the cursor to the end of the line.
    pub delete_after_cursor: Binding,
    /// Jump to the start of the line.
    pub line_start: Binding,
    /// Jump to the end of the line.
    pub line_end: Binding,
}

fn ctrl(c: char) -> KeyPress {
    KeyPress::from((KeyCode::Char(c), KeyModifiers::CONTROL))
}

impl Default for FieldKeyMap {
    fn default() -> Self {
        Self {
            character_forward: Binding::new(vec![
                KeyPress::from(KeyCode::Right),
                ctrl('f'),
            ])
            .with_help("→", "forward"),
            character_backward: Binding::new(vec![
                KeyPress::from(KeyCode::Left),
                ctrl('b'),
            ])
            .with_help("←", "back"),
            delete_character_backward: Binding::new(vec![
                KeyPress::from(KeyCode::Backspace),
                ctrl('h'),
            ])
            .with_help("backspace", "delete"),
            delete_character_forward: Binding::new(vec![
                KeyPress::from(KeyCode::Delete),
                ctrl('d'),
            ])
            .with_help("del", "delete forward"),
            delete_before_cursor: Binding::new(vec![ctrl('u')])
                .with_help("ctrl+u", "delete to start"),
            delete_after_cursor: Binding::new(vec![ctrl('k')])
                .with_help("ctrl+k", "delete to end"),
            line_start: Binding::new(vec![
                KeyPress::from(KeyCode::Home),
                ctrl('a'),
            ])
            .with_help("home", "line start"),
            line_end: Binding::new(vec![
                KeyPress::from(KeyCode::End),
                ctrl('e'),
            ])
            .with_help("end", "line end"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Edit {
    Insert(char),
    DeleteBackward,
    DeleteForward,
    DeleteToStart,
    DeleteToEnd,
    Forward,
    Backward,
    LineStart,
    LineEnd,
}

/// Single-line text field with a selection.
#[derive(Debug, Clone)]
pub struct TextField {
    /// Text shown before the value.
    pub prompt: String,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Style of the prompt.
    pub prompt_style: Style,
    /// Style of the placeholder.
    pub placeholder_style: Style,
    /// Style of selected text and the cursor cell.
    pub selection_style: Style,
    /// Key bindings.
    pub key_map: FieldKeyMap,
    value: Vec<char>,
    pos: usize,
    anchor: Option<usize>,
    focus: bool,
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl TextField {
    /// Creates an empty, unfocused field.
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            prompt_style: Style::new(),
            placeholder_style: Style::new().foreground(Color::from("240")),
            selection_style: Style::new().reverse(true),
            key_map: FieldKeyMap::default(),
            value: Vec::new(),
            pos: 0,
            anchor: None,
            focus: false,
        }
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Selected range, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let (start, end) = if anchor <= self.pos {
            (anchor, self.pos)
        } else {
            (self.pos, anchor)
        };
        (start < end).then_some(start..end)
    }

    /// Selected text.
    pub fn selected_text(&self) -> String {
        self.selection()
            .map(|r| self.value[r].iter().collect())
            .unwrap_or_default()
    }

    fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some(range) => {
                self.pos = range.start;
                self.value.drain(range);
                self.anchor = None;
                true
            }
            None => {
                self.anchor = None;
                false
            }
        }
    }

    fn insert(&mut self, c: char) {
        self.delete_selection();
        self.value.insert(self.pos, c);
        self.pos += 1;
    }

    fn edit_for(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Edit> {
        let msg = KeyMsg {
            key: code,
            modifiers,
        };
        let keys = &self.key_map;
        let edit = if keys.delete_character_backward.matches(&msg) {
            Edit::DeleteBackward
        } else if keys.delete_character_forward.matches(&msg) {
            Edit::DeleteForward
        } else if keys.delete_before_cursor.matches(&msg) {
            Edit::DeleteToStart
        } else if keys.delete_after_cursor.matches(&msg) {
            Edit::DeleteToEnd
        } else if keys.character_forward.matches(&msg) {
            Edit::Forward
        } else if keys.character_backward.matches(&msg) {
            Edit::Backward
        } else if keys.line_start.matches(&msg) {
            Edit::LineStart
        } else if keys.line_end.matches(&msg) {
            Edit::LineEnd
        } else {
            match code {
                KeyCode::Char(c)
                    if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    Edit::Insert(c)
                }
                _ => return None,
            }
        };
        Some(edit)
    }

    fn apply(&mut self, edit: Edit) {
        match edit {
            Edit::Insert(c) => self.insert(c),
            Edit::DeleteBackward => {
                if !self.delete_selection() && self.pos > 0 {
                    self.pos -= 1;
                    self.value.remove(self.pos);
                }
            }
            Edit::DeleteForward => {
                if !self.delete_selection() && self.pos < self.value.len() {
                    self.value.remove(self.pos);
                }
            }
            Edit::DeleteToStart => {
                self.anchor = None;
                self.value.drain(..self.pos);
                self.pos = 0;
            }
            Edit::DeleteToEnd => {
                self.anchor = None;
                self.value.truncate(self.pos);
            }
            Edit::Forward => {
                self.pos = match self.selection() {
                    Some(range) => range.end,
                    None => (self.pos + 1).min(self.value.len()),
                };
                self.anchor = None;
            }
            Edit::Backward => {
                self.pos = match self.selection() {
                    Some(range) => range.start,
                    None => self.pos.saturating_sub(1),
                };
                self.anchor = None;
            }
            Edit::LineStart => {
                self.anchor = None;
                self.pos = 0;
            }
            Edit::LineEnd => self.move_to_end(),
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(edit) = self.edit_for(code, modifiers) {
            self.apply(edit);
        }
    }
}

impl Component for TextField {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl InputField for TextField {
    fn value(&self) -> String {
        self.value.iter().collect()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.move_to_end();
    }

    fn select(&mut self, range: Range<usize>) {
        let end = range.end.min(self.value.len());
        let start = range.start.min(end);
        self.anchor = Some(start);
        self.pos = end;
    }

    fn move_to_end(&mut self) {
        self.anchor = None;
        self.pos = self.value.len();
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key.key, key.modifiers);
        } else if let Some(event) = msg.downcast_ref::<KeyEvent>() {
            if event.kind != KeyEventKind::Release {
                self.handle_key(event.code, event.modifiers);
            }
        }
        None
    }

    fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return format!("{}{}", prompt, self.placeholder_style.render(&self.placeholder));
        }

        let mut out = prompt;
        match self.selection() {
            Some(range) => {
                out.push_str(&self.value[..range.start].iter().collect::<String>());
                let selected: String = self.value[range.clone()].iter().collect();
                out.push_str(&self.selection_style.render(&selected));
                out.push_str(&self.value[range.end..].iter().collect::<String>());
            }
            None => {
                out.push_str(&self.value[..self.pos].iter().collect::<String>());
                if self.focus {
                    let under = self.value.get(self.pos).copied().unwrap_or(' ');
                    out.push_str(&self.selection_style.render(&under.to_string()));
                    if self.pos < self.value.len() {
                        out.push_str(&self.value[self.pos + 1..].iter().collect::<String>());
                    }
                } else {
                    out.push_str(&self.value[self.pos..].iter().collect::<String>());
                }
            }
        }
        out
    }
}

impl BubbleTeaModel for TextField {
    fn init() -> (Self, Option<Cmd>) {
        let mut field = TextField::new();
        let cmd = Component::focus(&mut field);
        (field, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        InputField::update(self, msg)
    }

    fn view(&self) -> String {
        InputField::view(self)
    }
}
