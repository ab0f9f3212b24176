//! Suggestion providers and the messages that carry their results.
//!
//! A provider receives a query and a [`RequestTicket`] and returns a command
//! that eventually yields a [`SuggestionsMsg`] stamped with the same ticket.
//! The popup only accepts the message whose ticket matches its latest
//! request, so a provider whose cancellation is best-effort (or absent) can
//! still deliver late results without corrupting the list.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_suggest::provider::StaticProvider;
//! use bubbletea_suggest::suggestion::Suggestion;
//!
//! let provider = StaticProvider::new(vec![
//!     Suggestion::new("Paris").with_subtitle("France"),
//!     Suggestion::new("Park City").with_subtitle("Utah"),
//! ]);
//! let matches = provider.search("par");
//! assert_eq!(matches.len(), 2);
//! ```

use crate::suggestion::{HighlightRange, Suggestion};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

static LAST_POPUP_ID: AtomicU64 = AtomicU64::new(0);

/// Allocates a process-unique popup identifier used to route results.
pub(crate) fn next_popup_id() -> u64 {
    LAST_POPUP_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Identifies one provider request.
///
/// `popup_id` routes the result to the popup that issued it; `seq` increases
/// with every request that popup issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    /// Identifier of the issuing popup.
    pub popup_id: u64,
    /// Sequence number of the request within that popup.
    pub seq: u64,
}

/// Why a request produced no suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The backend reported a failure.
    #[error("suggestion request failed: {0}")]
    Failed(String),
    /// The request was cancelled before it completed.
    #[error("suggestion request cancelled")]
    Cancelled,
}

/// Result of one provider request.
#[derive(Debug, Clone)]
pub struct SuggestionsMsg {
    /// Ticket of the request this answers.
    pub ticket: RequestTicket,
    /// Suggestions in ranked order, or the failure.
    pub outcome: Result<Vec<Suggestion>, ProviderError>,
}

impl SuggestionsMsg {
    /// A successful result.
    pub fn ready(ticket: RequestTicket, items: Vec<Suggestion>) -> Self {
        Self {
            ticket,
            outcome: Ok(items),
        }
    }

    /// A failed result.
    pub fn failed(ticket: RequestTicket, error: ProviderError) -> Self {
        Self {
            ticket,
            outcome: Err(error),
        }
    }

    /// Wraps this message in a command that resolves immediately.
    pub fn into_cmd(self) -> Cmd {
        Box::pin(async move { Some(Box::new(self) as Msg) })
    }
}

impl From<SuggestionsMsg> for Msg {
    fn from(msg: SuggestionsMsg) -> Self {
        Box::new(msg) as Msg
    }
}

/// Source of suggestions for a query.
///
/// Implementations must eventually answer each request at most once with a
/// [`SuggestionsMsg`] carrying the ticket they were given, either through the
/// returned command or by delivering the message to the program some other
/// way (returning `None`).
///
/// The popup calls [`SuggestionProvider::cancel`] for the previous ticket
/// before every new request and whenever it hides. Answers that still arrive
/// for a cancelled ticket are dropped, so cancellation may be best-effort.
///
/// # Examples
///
/// A provider backed by a fixed list of words:
///
/// ```rust
/// use bubbletea_rs::Cmd;
/// use bubbletea_suggest::provider::{RequestTicket, SuggestionProvider, SuggestionsMsg};
/// use bubbletea_suggest::suggestion::Suggestion;
///
/// struct Words(Vec<&'static str>);
///
/// impl SuggestionProvider for Words {
///     fn request(&mut self, query: &str, ticket: RequestTicket) -> Option<Cmd> {
///         let items = self
///             .0
///             .iter()
///             .filter(|w| w.starts_with(query))
///             .map(|w| Suggestion::new(*w))
///             .collect();
///         Some(SuggestionsMsg::ready(ticket, items).into_cmd())
///     }
/// }
/// ```
pub trait SuggestionProvider: Send + 'static {
    /// Starts a search for `query`.
    ///
    /// # Arguments
    ///
    /// * `query` - Text the user typed, never empty
    /// * `ticket` - Identifies this request; it must be copied into the answer
    ///
    /// # Returns
    ///
    /// A command resolving to the [`SuggestionsMsg`], or `None` when the
    /// answer is delivered to the program by other means.
    fn request(&mut self, query: &str, ticket: RequestTicket) -> Option<Cmd>;

    /// Best-effort cancellation of an in-flight request. The default does
    /// nothing.
    fn cancel(&mut self, _ticket: RequestTicket) {}
}

/// In-memory provider that fuzzy matches a fixed candidate set.
///
/// Matches are ranked by score and carry highlight ranges for the matched
/// title characters. An optional delay makes results arrive through a
/// timer, which is handy for exercising the busy indicator.
pub struct StaticProvider {
    candidates: Vec<Suggestion>,
    matcher: SkimMatcherV2,
    max_results: usize,
    delay: Duration,
    cancelled: Vec<RequestTicket>,
}

impl std::fmt::Debug for StaticProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticProvider")
            .field("candidates", &self.candidates.len())
            .field("max_results", &self.max_results)
            .field("delay", &self.delay)
            .finish()
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl StaticProvider {
    /// Creates a provider over `candidates`.
    pub fn new(candidates: Vec<Suggestion>) -> Self {
        Self {
            candidates,
            matcher: SkimMatcherV2::default(),
            max_results: 20,
            delay: Duration::ZERO,
            cancelled: Vec::new(),
        }
    }

    /// Limits the number of returned suggestions.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Delays every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Tickets passed to [`SuggestionProvider::cancel`], oldest first.
    pub fn cancelled(&self) -> &[RequestTicket] {
        &self.cancelled
    }

    /// Runs the match synchronously.
    pub fn search(&self, query: &str) -> Vec<Suggestion> {
        let mut scored: Vec<(i64, Suggestion)> = self
            .candidates
            .iter()
            .filter_map(|candidate| {
                let (score, indices) = self.matcher.fuzzy_indices(&candidate.title, query)?;
                let highlighted = candidate
                    .clone()
                    .with_title_highlights(HighlightRange::from_indices(&indices));
                Some((score, highlighted))
            })
            .collect();
        // stable sort keeps candidate order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, s)| s)
            .collect()
    }
}

impl SuggestionProvider for StaticProvider {
    fn request(&mut self, query: &str, ticket: RequestTicket) -> Option<Cmd> {
        let msg = SuggestionsMsg::ready(ticket, self.search(query));
        if self.delay.is_zero() {
            return Some(msg.into_cmd());
        }
        Some(bubbletea_tick(self.delay, move |_| {
            Box::new(msg.clone()) as Msg
        }))
    }

    fn cancel(&mut self, ticket: RequestTicket) {
        self.cancelled.push(ticket);
    }
}
