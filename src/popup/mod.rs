//! Suggestion popup attached to a text field.
//!
//! The popup listens to its field: typing issues a provider request and
//! shows a busy indicator, results open a list of rows below the field, and
//! clearing the text, losing focus, committing a row or clicking elsewhere
//! closes it again.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_suggest::field::TextField;
//! use bubbletea_suggest::popup::{new, with_max_rows, Rect};
//! use bubbletea_suggest::provider::StaticProvider;
//! use bubbletea_suggest::suggestion::Suggestion;
//! use bubbletea_suggest::Component;
//!
//! let provider = StaticProvider::new(vec![
//!     Suggestion::new("Paris").with_subtitle("France"),
//!     Suggestion::new("Park City").with_subtitle("Utah"),
//! ]);
//! let mut popup = new(provider, TextField::new(), &[with_max_rows(5)]);
//! popup.set_anchor(Rect::new(0, 0, 30, 1));
//! let _cmd = popup.focus();
//! assert!(popup.focused());
//! ```
//!
//! # Lifecycle
//!
//! | From | Trigger | To |
//! |---|---|---|
//! | any | text changed to non-empty | `Loading` |
//! | `Loading` | results with items | `Shown` |
//! | `Loading` | no results or provider error | `Hidden` |
//! | any | text cleared, focus lost, commit, outside click | `Hidden` |
//!
//! Only the latest request counts. Results carrying an older ticket are
//! dropped even if the provider failed to cancel them.

pub mod model;
pub mod view;

#[cfg(test)]
mod tests;

pub use model::{
    new, with_capture_slot, with_indicator, with_key_map, with_max_rows, with_min_width,
    with_styles, Model, Phase, PopupOption, Rect, DEFAULT_MAX_ROWS,
};
pub use view::PopupStyles;
