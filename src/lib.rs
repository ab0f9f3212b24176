#![warn(missing_docs)]

//! # bubbletea-suggest
//!
//! An autocomplete suggestion popup for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. The popup attaches to a single-line text field, asks a
//! [`SuggestionProvider`] for matches as the user types and shows them as a
//! list right below the field.
//!
//! ## Overview
//!
//! - Each keystroke replaces the outstanding request. Late results for an
//!   older query are dropped.
//! - Up and down move the highlight and preview the suggestion in the field,
//!   selecting the part the user did not type.
//! - Enter commits the highlighted row, tab dismisses the popup, and clicking
//!   outside the popup or the field closes it.
//! - Lifecycle callbacks (show, hide, highlight, select, focus) are delivered
//!   through [`popup::Model::subscribe`].
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_suggest::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     search: SuggestPopup<StaticProvider>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let provider = StaticProvider::new(vec![
//!             Suggestion::new("Paris").with_subtitle("France"),
//!             Suggestion::new("Park City").with_subtitle("Utah"),
//!         ]);
//!         let mut search = popup_new(provider, TextField::new(), &[with_max_rows(5)]);
//!         search.set_anchor(Rect::new(0, 0, 40, 1));
//!         let cmd = search.focus();
//!         (Self { search }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.search.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.search.view()
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |---|---|
//! | [`suggestion`] | Suggestion rows and match highlight ranges |
//! | [`list_state`] | Result list with highlight and scrolling |
//! | [`provider`] | Provider trait, request tickets and an in-memory fuzzy provider |
//! | [`observer`] | Lifecycle events and subscriptions |
//! | [`capture`] | Exclusive input capture between popups |
//! | [`busy`] | Busy indicator shown while loading |
//! | [`key`] | Key bindings |
//! | [`field`] | Input field abstraction and a text field |
//! | [`input_binding`] | Field change detection |
//! | [`router`] | Key routing while the popup is shown |
//! | [`popup`] | The popup itself |

pub mod busy;
pub mod capture;
pub mod field;
pub mod input_binding;
pub mod key;
pub mod list_state;
pub mod observer;
pub mod popup;
pub mod provider;
pub mod router;
pub mod suggestion;

use bubbletea_rs::Cmd;

/// Components that take and release keyboard focus.
///
/// ```rust
/// use bubbletea_suggest::field::TextField;
/// use bubbletea_suggest::Component;
///
/// let mut field = TextField::new();
/// assert!(!field.focused());
/// let _ = field.focus();
/// assert!(field.focused());
/// field.blur();
/// assert!(!field.focused());
/// ```
pub trait Component {
    /// Gives the component focus. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes focus away.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use busy::{Frames, Indicator as BusyIndicator, TickMsg as BusyTickMsg};
pub use capture::{CaptureGuard, CaptureSlot};
pub use field::{FieldKeyMap, InputField, TextField};
pub use input_binding::{FieldSignal, InputBinding};
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use list_state::ListState;
pub use observer::{EventKind, Observers, PopupEvent, SubscriptionId};
pub use popup::{
    new as popup_new, with_capture_slot, with_indicator, with_key_map, with_max_rows,
    with_min_width, with_styles, Model as SuggestPopup, Phase, PopupOption, PopupStyles, Rect,
};
pub use provider::{
    ProviderError, RequestTicket, StaticProvider, SuggestionProvider, SuggestionsMsg,
};
pub use router::{Action, PopupKeyMap, Routed};
pub use suggestion::{HighlightRange, Suggestion};

/// Commonly used types in one import.
///
/// ```rust
/// use bubbletea_suggest::prelude::*;
///
/// let popup = popup_new(StaticProvider::default(), TextField::new(), &[]);
/// assert_eq!(popup.phase(), Phase::Hidden);
/// ```
pub mod prelude {
    pub use crate::field::{InputField, TextField};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::observer::{EventKind, PopupEvent};
    pub use crate::popup::{
        new as popup_new, with_max_rows, with_min_width, Model as SuggestPopup, Phase, Rect,
    };
    pub use crate::provider::{StaticProvider, SuggestionProvider, SuggestionsMsg};
    pub use crate::suggestion::{HighlightRange, Suggestion};
    pub use crate::Component;
}
