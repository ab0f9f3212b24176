//! Popup controller state machine.

use super::view::PopupStyles;
use crate::busy::{Frames, Indicator};
use crate::capture::{CaptureGuard, CaptureSlot};
use crate::field::{InputField, TextField};
use crate::input_binding::{FieldSignal, InputBinding};
use crate::list_state::ListState;
use crate::observer::{EventKind, Observers, PopupEvent, SubscriptionId};
use crate::provider::{next_popup_id, RequestTicket, SuggestionProvider, SuggestionsMsg};
use crate::router::{Action, PopupKeyMap, Routed};
use crate::suggestion::Suggestion;
use crate::Component;
use bubbletea_rs::{batch, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, trace, warn};

/// Rows shown before the list scrolls.
pub const DEFAULT_MAX_ROWS: usize = 5;

/// Lifecycle phase of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not visible.
    Hidden,
    /// Visible with the busy indicator while a request is in flight.
    Loading,
    /// Visible with suggestion rows.
    Shown,
}

/// A screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the cell at `(column, row)` lies inside.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (column, row) = (u32::from(column), u32::from(row));
        let (x, y) = (u32::from(self.x), u32::from(self.y));
        column >= x
            && column < x + u32::from(self.width)
            && row >= y
            && row < y + u32::from(self.height)
    }
}

/// Configuration option for [`new`].
#[derive(Debug, Clone)]
pub enum PopupOption {
    /// Maximum number of visible rows.
    MaxRows(usize),
    /// Minimum popup width in columns.
    MinWidth(u16),
    /// Key bindings.
    KeyMap(PopupKeyMap),
    /// Rendering styles.
    Styles(Box<PopupStyles>),
    /// Busy indicator frames.
    Indicator(Frames),
    /// Slot shared with other popups for exclusive input capture.
    CaptureSlot(CaptureSlot),
}

/// Sets the maximum number of visible rows.
pub fn with_max_rows(rows: usize) -> PopupOption {
    PopupOption::MaxRows(rows)
}

/// Sets the minimum popup width.
pub fn with_min_width(width: u16) -> PopupOption {
    PopupOption::MinWidth(width)
}

/// Replaces the key bindings.
pub fn with_key_map(key_map: PopupKeyMap) -> PopupOption {
    PopupOption::KeyMap(key_map)
}

/// Replaces the rendering styles.
pub fn with_styles(styles: PopupStyles) -> PopupOption {
    PopupOption::Styles(Box::new(styles))
}

/// Replaces the busy indicator frames.
pub fn with_indicator(frames: Frames) -> PopupOption {
    PopupOption::Indicator(frames)
}

/// Shares input capture with other popups using the same slot.
pub fn with_capture_slot(slot: CaptureSlot) -> PopupOption {
    PopupOption::CaptureSlot(slot)
}

/// Suggestion popup bound to an input field.
///
/// The popup owns the field, the provider and the result list. Feed every
/// message to [`Model::update`]; keys the popup does not consume reach the
/// field, and the popup reacts to whatever the field reports afterwards.
pub struct Model<P: SuggestionProvider, F: InputField = TextField> {
    pub(super) provider: P,
    pub(super) field: F,
    pub(super) list: ListState,
    pub(super) phase: Phase,
    pub(super) query: String,
    pub(super) binding: InputBinding,
    pub(super) observers: Observers,
    pub(super) busy: Indicator,
    /// Key bindings.
    pub key_map: PopupKeyMap,
    /// Rendering styles.
    pub styles: PopupStyles,
    /// Maximum number of visible rows.
    pub max_rows: usize,
    /// Minimum popup width in columns.
    pub min_width: u16,
    capture_slot: CaptureSlot,
    capture: Option<CaptureGuard>,
    anchor: Option<Rect>,
    id: u64,
    seq: u64,
    in_flight: Option<RequestTicket>,
}

impl<P: SuggestionProvider + std::fmt::Debug, F: InputField + std::fmt::Debug> std::fmt::Debug
    for Model<P, F>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("query", &self.query)
            .field("items", &self.list.len())
            .field("highlighted", &self.list.highlighted_index())
            .field("in_flight", &self.in_flight)
            .field("provider", &self.provider)
            .field("field", &self.field)
            .finish()
    }
}

/// Creates a popup with configuration options.
///
/// This is the options-pattern constructor. Options are applied in order, so
/// a later option overrides an earlier one of the same kind.
///
/// # Arguments
///
/// * `provider` - Source of suggestions for each query
/// * `field` - The input field the popup is bound to
/// * `opts` - Slice of [`PopupOption`] values such as [`with_max_rows`]
///
/// # Returns
///
/// A hidden popup. Focus it (through [`Component::focus`]) to start
/// reacting to typed text.
///
/// # Examples
///
/// ```rust
/// use bubbletea_suggest::popup::{new, with_max_rows, Phase};
/// use bubbletea_suggest::provider::StaticProvider;
/// use bubbletea_suggest::field::TextField;
///
/// let popup = new(StaticProvider::default(), TextField::new(), &[with_max_rows(8)]);
/// assert_eq!(popup.phase(), Phase::Hidden);
/// assert_eq!(popup.max_rows, 8);
/// ```
pub fn new<P: SuggestionProvider, F: InputField>(
    provider: P,
    field: F,
    opts: &[PopupOption],
) -> Model<P, F> {
    let mut m = Model::new(provider, field);
    for opt in opts {
        m.apply(opt);
    }
    m
}

fn merge(cmds: Vec<Cmd>) -> Option<Cmd> {
    let mut cmds = cmds;
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(batch(cmds)),
    }
}

impl<P: SuggestionProvider, F: InputField> Model<P, F> {
    /// Creates a hidden popup with default settings.
    ///
    /// The popup takes the field's current text as its query but issues no
    /// request until that text changes or the field gains focus. It gets its
    /// own capture slot; use [`Model::with_capture_slot`] to share one with
    /// other popups.
    ///
    /// # Arguments
    ///
    /// * `provider` - Source of suggestions for each query
    /// * `field` - The input field the popup is bound to
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_suggest::field::TextField;
    /// use bubbletea_suggest::popup::{Model, DEFAULT_MAX_ROWS};
    /// use bubbletea_suggest::provider::StaticProvider;
    ///
    /// let popup = Model::new(StaticProvider::default(), TextField::new());
    /// assert!(!popup.is_visible());
    /// assert_eq!(popup.max_rows, DEFAULT_MAX_ROWS);
    /// ```
    pub fn new(provider: P, field: F) -> Self {
        let binding = InputBinding::new(&field);
        let query = field.value();
        Self {
            provider,
            field,
            list: ListState::new(),
            phase: Phase::Hidden,
            query,
            binding,
            observers: Observers::new(),
            busy: Indicator::new(),
            key_map: PopupKeyMap::default(),
            styles: PopupStyles::default(),
            max_rows: DEFAULT_MAX_ROWS,
            min_width: 0,
            capture_slot: CaptureSlot::new(),
            capture: None,
            anchor: None,
            id: next_popup_id(),
            seq: 0,
            in_flight: None,
        }
    }

    fn apply(&mut self, opt: &PopupOption) {
        match opt {
            PopupOption::MaxRows(rows) => self.max_rows = (*rows).max(1),
            PopupOption::MinWidth(width) => self.min_width = *width,
            PopupOption::KeyMap(key_map) => self.key_map = key_map.clone(),
            PopupOption::Styles(styles) => self.styles = styles.as_ref().clone(),
            PopupOption::Indicator(frames) => self.busy.frames = frames.clone(),
            PopupOption::CaptureSlot(slot) => self.capture_slot = slot.clone(),
        }
    }

    /// Sets the maximum number of visible rows.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows.max(1);
        self
    }

    /// Sets the capture slot.
    pub fn with_capture_slot(mut self, slot: CaptureSlot) -> Self {
        self.capture_slot = slot;
        self
    }

    /// Identifier stamped on this popup's requests.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the popup is on screen.
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Text the user last typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current result list.
    pub fn list(&self) -> &ListState {
        &self.list
    }

    /// Highlighted suggestion.
    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.list.current()
    }

    /// The bound field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// The provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Ticket of the request awaiting results.
    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    /// Whether this popup currently holds input capture.
    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Subscribes to popup events.
    ///
    /// Every subscriber of `kind` is called once per event, in subscription
    /// order, synchronously from inside the call that caused the event.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which events to receive
    /// * `callback` - Called with each matching [`PopupEvent`]
    ///
    /// # Returns
    ///
    /// A handle for [`Model::unsubscribe`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_suggest::field::TextField;
    /// use bubbletea_suggest::observer::{EventKind, PopupEvent};
    /// use bubbletea_suggest::popup::Model;
    /// use bubbletea_suggest::provider::StaticProvider;
    ///
    /// let mut popup = Model::new(StaticProvider::default(), TextField::new());
    /// let id = popup.subscribe(EventKind::Select, |event| {
    ///     if let PopupEvent::Select { suggestion, .. } = event {
    ///         println!("picked {}", suggestion.title);
    ///     }
    /// });
    /// assert!(popup.unsubscribe(id));
    /// ```
    pub fn subscribe<C>(&mut self, kind: EventKind, callback: C) -> SubscriptionId
    where
        C: FnMut(&PopupEvent) + Send + 'static,
    {
        self.observers.subscribe(kind, callback)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Reports where the field is on screen. The popup opens right below it.
    ///
    /// Pointer input is ignored until an anchor is set, since hover, click
    /// and outside-click detection all need the popup's screen area. Call
    /// this again whenever the layout moves the field.
    ///
    /// # Arguments
    ///
    /// * `area` - The field's rectangle in terminal cells
    pub fn set_anchor(&mut self, area: Rect) {
        self.anchor = Some(area);
    }

    /// Field area last passed to [`Model::set_anchor`].
    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    /// Screen area of the popup, when visible and anchored.
    pub fn popup_area(&self) -> Option<Rect> {
        let anchor = self.anchor?;
        let rows = match self.phase {
            Phase::Hidden => return None,
            Phase::Loading => 1,
            Phase::Shown => self.list.visible(self.max_rows).1.len(),
        };
        Some(Rect::new(
            anchor.x,
            anchor.y.saturating_add(anchor.height),
            anchor.width.max(self.min_width),
            u16::try_from(rows).unwrap_or(u16::MAX),
        ))
    }

    /// Shows the popup with the current list.
    ///
    /// Becoming visible takes input capture and fires [`PopupEvent::Show`].
    /// Calling this on a visible popup is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the popup was hidden and is now shown. `false` when it was
    /// already visible or the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_suggest::field::TextField;
    /// use bubbletea_suggest::popup::{Model, Phase};
    /// use bubbletea_suggest::provider::StaticProvider;
    /// use bubbletea_suggest::suggestion::Suggestion;
    ///
    /// let mut popup = Model::new(StaticProvider::default(), TextField::new());
    /// assert!(!popup.show());
    ///
    /// popup.set_suggestions(vec![Suggestion::new("Oslo")]);
    /// assert!(popup.show());
    /// assert!(!popup.show());
    /// assert_eq!(popup.phase(), Phase::Shown);
    /// ```
    pub fn show(&mut self) -> bool {
        if self.is_visible() || self.list.is_empty() {
            return false;
        }
        self.phase = Phase::Shown;
        self.become_visible();
        true
    }

    /// Hides the popup, cancelling any request and clearing the list.
    ///
    /// Hiding stops the busy indicator, releases input capture and fires
    /// [`PopupEvent::Hide`]. The field text is left as it is.
    ///
    /// # Returns
    ///
    /// `true` if the popup was visible. `false` when it was already hidden,
    /// in which case nothing happens.
    pub fn hide(&mut self) -> bool {
        if self.phase == Phase::Hidden {
            return false;
        }
        self.cancel_in_flight();
        self.busy.stop();
        self.list.clear();
        self.capture = None;
        self.phase = Phase::Hidden;
        debug!(popup = self.id, "suggestion popup hidden");
        self.observers.emit(&PopupEvent::Hide);
        true
    }

    /// Installs a result set directly, bypassing the provider.
    ///
    /// An empty set hides the popup. A non-empty set ends loading but does
    /// not open a hidden popup; call [`Model::show`] for that.
    pub fn set_suggestions(&mut self, items: Vec<Suggestion>) {
        self.cancel_in_flight();
        self.busy.stop();
        if items.is_empty() {
            self.hide();
            return;
        }
        self.list.replace(items);
        if self.phase == Phase::Loading {
            self.phase = Phase::Shown;
        }
    }

    /// Moves the highlight down one row.
    pub fn highlight_next(&mut self) {
        let before = self.list.highlighted_index();
        self.list.highlight_next();
        self.highlight_moved(before);
    }

    /// Moves the highlight up one row, clearing it above the first row.
    pub fn highlight_previous(&mut self) {
        let before = self.list.highlighted_index();
        self.list.highlight_previous();
        self.highlight_moved(before);
    }

    /// Highlights the row at `index` (e.g. under the pointer).
    pub fn highlight_row(&mut self, index: usize) {
        let before = self.list.highlighted_index();
        self.list.highlight(index);
        self.highlight_moved(before);
    }

    /// Clears the highlight and puts the typed query back into the field.
    ///
    /// Does nothing when no row is highlighted.
    pub fn clear_highlight(&mut self) {
        let before = self.list.highlighted_index();
        self.list.clear_highlight();
        self.highlight_moved(before);
    }

    /// Commits the highlighted row, or just hides when none is highlighted.
    ///
    /// Returns whether a row was committed.
    pub fn commit(&mut self) -> bool {
        match self.list.current().cloned() {
            Some(suggestion) => {
                self.commit_suggestion(suggestion);
                true
            }
            None => {
                self.hide();
                false
            }
        }
    }

    /// Whether [`Model::update`] would keep `msg` from reaching the field.
    pub fn would_consume(&self, msg: &Msg) -> bool {
        self.route(msg).is_some_and(|r| r.consumed)
    }

    /// Handles a message.
    ///
    /// Suggestion results and busy ticks are consumed here. Keys are routed
    /// while the popup captures input, pointer events drive hover, click and
    /// dismissal, and everything not consumed is passed on to the field.
    /// Afterwards the popup compares the field with its last snapshot and
    /// reacts to text and focus changes.
    ///
    /// # Arguments
    ///
    /// * `msg` - Any message from the program loop
    ///
    /// # Returns
    ///
    /// Commands from the field, the provider and the busy indicator, batched
    /// when there is more than one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_rs::KeyMsg;
    /// use bubbletea_suggest::field::{InputField, TextField};
    /// use bubbletea_suggest::popup::{Model, Phase};
    /// use bubbletea_suggest::provider::StaticProvider;
    /// use bubbletea_suggest::suggestion::Suggestion;
    /// use bubbletea_suggest::Component;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let provider = StaticProvider::new(vec![Suggestion::new("Paris")]);
    /// let mut popup = Model::new(provider, TextField::new());
    /// let _ = popup.focus();
    ///
    /// let key = KeyMsg { key: KeyCode::Char('p'), modifiers: KeyModifiers::NONE };
    /// let cmd = popup.update(Box::new(key));
    /// assert!(cmd.is_some());
    /// assert_eq!(popup.phase(), Phase::Loading);
    /// assert_eq!(popup.field().value(), "p");
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<SuggestionsMsg>() {
            Ok(results) => {
                self.receive(*results);
                return None;
            }
            Err(msg) => msg,
        };

        if let Some(cmd) = self.busy.update(&msg) {
            return Some(cmd);
        }

        let mut cmds = Vec::new();
        if let Some(routed) = self.route(&msg) {
            trace!(popup = self.id, action = ?routed.action, "routed key");
            self.perform(routed.action);
            if routed.consumed {
                return None;
            }
        } else if let Some(event) = msg.downcast_ref::<MouseEvent>() {
            self.pointer(event);
        }

        if let Some(cmd) = self.field.update(msg) {
            cmds.push(cmd);
        }
        cmds.extend(self.sync_field());
        merge(cmds)
    }

    fn router_active(&self) -> bool {
        self.phase == Phase::Shown && self.field.focused() && self.capture.is_some()
    }

    fn route(&self, msg: &Msg) -> Option<Routed> {
        if !self.router_active() {
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.key_map.route(key);
        }
        if let Some(event) = msg.downcast_ref::<KeyEvent>() {
            return self.key_map.route_event(event);
        }
        None
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Next => self.highlight_next(),
            Action::Previous => self.highlight_previous(),
            Action::Commit => {
                self.commit();
            }
            Action::Dismiss => {
                self.hide();
            }
            Action::Ignore => {}
        }
    }

    fn pointer(&mut self, event: &MouseEvent) {
        if self.capture.is_none() {
            return;
        }
        let Some(popup) = self.popup_area() else {
            return;
        };
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Moved => match self.row_at(column, row) {
                Some(index) => self.highlight_row(index),
                None => self.clear_highlight(),
            },
            MouseEventKind::Down(button) => {
                if let Some(index) = self.row_at(column, row) {
                    if button == MouseButton::Left {
                        if let Some(suggestion) = self.list.items().get(index).cloned() {
                            self.commit_suggestion(suggestion);
                        }
                    }
                } else if popup.contains(column, row)
                    || self.anchor.is_some_and(|a| a.contains(column, row))
                {
                    // presses on the popup chrome or the field keep it open
                } else {
                    debug!(popup = self.id, column, row, "pointer pressed outside popup");
                    self.hide();
                }
            }
            _ => {}
        }
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.phase != Phase::Shown {
            return None;
        }
        let area = self.popup_area()?;
        if !area.contains(column, row) {
            return None;
        }
        let index = self.list.offset() + usize::from(row - area.y);
        (index < self.list.len()).then_some(index)
    }

    fn sync_field(&mut self) -> Vec<Cmd> {
        let mut cmds = Vec::new();
        for signal in self.binding.observe(&self.field) {
            match signal {
                FieldSignal::TextChanged(text) => cmds.extend(self.query_changed(text)),
                FieldSignal::FocusGained => {
                    self.observers.emit(&PopupEvent::FocusGained);
                    cmds.extend(self.focus_gained());
                }
                FieldSignal::FocusLost => self.focus_lost(),
            }
        }
        cmds
    }

    fn focus_lost(&mut self) {
        self.observers.emit(&PopupEvent::FocusLost);
        self.hide();
    }

    fn query_changed(&mut self, text: String) -> Option<Cmd> {
        self.query = text;
        if self.query.is_empty() {
            self.hide();
            return None;
        }
        self.request()
    }

    fn focus_gained(&mut self) -> Option<Cmd> {
        let text = self.field.value();
        if text.is_empty() {
            return None;
        }
        if self.show() {
            return None;
        }
        if self.is_visible() {
            return None;
        }
        self.query = text;
        self.request()
    }

    fn request(&mut self) -> Option<Cmd> {
        self.cancel_in_flight();
        self.seq += 1;
        let ticket = RequestTicket {
            popup_id: self.id,
            seq: self.seq,
        };
        self.in_flight = Some(ticket);

        let was_hidden = self.phase == Phase::Hidden;
        self.phase = Phase::Loading;
        if was_hidden {
            self.become_visible();
        }

        debug!(popup = self.id, seq = ticket.seq, query = %self.query, "requesting suggestions");
        let mut cmds = vec![self.busy.start()];
        cmds.extend(self.provider.request(&self.query, ticket));
        merge(cmds)
    }

    fn cancel_in_flight(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            trace!(popup = self.id, seq = ticket.seq, "cancelling suggestion request");
            self.provider.cancel(ticket);
        }
    }

    fn receive(&mut self, results: SuggestionsMsg) {
        if results.ticket.popup_id != self.id {
            return;
        }
        if self.in_flight != Some(results.ticket) {
            trace!(popup = self.id, seq = results.ticket.seq, "dropping stale suggestions");
            return;
        }
        self.in_flight = None;
        self.busy.stop();

        match results.outcome {
            Ok(items) if !items.is_empty() => {
                debug!(popup = self.id, count = items.len(), "suggestions arrived");
                self.list.replace(items);
                self.phase = Phase::Shown;
            }
            Ok(_) => {
                self.hide();
            }
            Err(error) => {
                debug!(popup = self.id, %error, "suggestion request failed");
                self.hide();
            }
        }
    }

    fn become_visible(&mut self) {
        self.capture = self.capture_slot.acquire();
        if self.capture.is_none() {
            warn!(popup = self.id, "input capture held elsewhere; popup will not intercept input");
        }
        debug!(popup = self.id, "suggestion popup shown");
        self.observers.emit(&PopupEvent::Show);
    }

    fn highlight_moved(&mut self, before: Option<usize>) {
        if self.list.highlighted_index() == before {
            return;
        }
        self.list.scroll_into_view(self.max_rows);

        let current = self.list.current().cloned();
        match &current {
            Some(suggestion) => {
                self.field.set_value(&suggestion.title);
                let start = if suggestion.title.starts_with(&self.query) {
                    self.query.chars().count()
                } else {
                    0
                };
                self.field.select(start..suggestion.title_len());
            }
            None => {
                self.field.set_value(&self.query);
                self.field.move_to_end();
            }
        }
        self.binding.absorb(&self.field);

        self.observers.emit(&PopupEvent::Highlight {
            query: self.query.clone(),
            suggestion: current,
        });
    }

    fn commit_suggestion(&mut self, suggestion: Suggestion) {
        debug!(popup = self.id, title = %suggestion.title, "suggestion committed");
        self.observers.emit(&PopupEvent::Select {
            query: self.query.clone(),
            suggestion: suggestion.clone(),
        });
        self.hide();
        self.field.set_value(&suggestion.title);
        self.binding.absorb(&self.field);
    }
}

impl<P: SuggestionProvider, F: InputField> Component for Model<P, F> {
    fn focus(&mut self) -> Option<Cmd> {
        let mut cmds = Vec::new();
        cmds.extend(self.field.focus());
        cmds.extend(self.sync_field());
        merge(cmds)
    }

    fn blur(&mut self) {
        self.field.blur();
        for signal in self.binding.observe(&self.field) {
            match signal {
                FieldSignal::FocusLost => self.focus_lost(),
                // an unfocused field never opens the popup
                FieldSignal::TextChanged(text) => self.query = text,
                FieldSignal::FocusGained => {}
            }
        }
    }

    fn focused(&self) -> bool {
        self.field.focused()
    }
}

impl<P, F> BubbleTeaModel for Model<P, F>
where
    P: SuggestionProvider + Default,
    F: InputField + Default,
{
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Model::new(P::default(), F::default());
        let cmd = Component::focus(&mut model);
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}
