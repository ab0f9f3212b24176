//! Suggestion list state: the current result set and the highlighted row.
//!
//! Navigation is deliberately asymmetric. Moving down from the last row stays
//! on the last row, while moving up from the first row clears the highlight so
//! the input field can return to what the user typed.

use crate::suggestion::Suggestion;

/// Ordered result set plus highlight and scroll position.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    items: Vec<Suggestion>,
    highlighted: Option<usize>,
    offset: usize,
}

impl ListState {
    /// Creates an empty list with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new result set and clears the highlight.
    pub fn replace(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.highlighted = None;
        self.offset = 0;
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Moves the highlight one row down.
    ///
    /// With nothing highlighted the first row is selected. On the last row
    /// this is a no-op.
    ///
    /// ```rust
    /// use bubbletea_suggest::list_state::ListState;
    /// use bubbletea_suggest::suggestion::Suggestion;
    ///
    /// let mut list = ListState::new();
    /// list.replace(vec![Suggestion::new("a"), Suggestion::new("b")]);
    /// list.highlight_next();
    /// list.highlight_next();
    /// list.highlight_next();
    /// assert_eq!(list.highlighted_index(), Some(1));
    /// ```
    pub fn highlight_next(&mut self) -> Option<&Suggestion> {
        self.highlighted = match self.highlighted {
            None if self.items.is_empty() => None,
            None => Some(0),
            Some(i) if i + 1 >= self.items.len() => Some(i),
            Some(i) => Some(i + 1),
        };
        self.current()
    }

    /// Moves the highlight one row up, clearing it when leaving the first row.
    pub fn highlight_previous(&mut self) -> Option<&Suggestion> {
        self.highlighted = match self.highlighted {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
        self.current()
    }

    /// Highlights `index` directly. Out of range indices clear the highlight.
    pub fn highlight(&mut self, index: usize) -> Option<&Suggestion> {
        self.highlighted = (index < self.items.len()).then_some(index);
        self.current()
    }

    /// Clears the highlight, keeping the items and scroll position.
    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// The highlighted suggestion, if any.
    pub fn current(&self) -> Option<&Suggestion> {
        self.highlighted.and_then(|i| self.items.get(i))
    }

    /// Index of the highlighted row.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// All items in display order.
    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First row of the visible window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Adjusts the scroll offset so the highlighted row fits in a window of
    /// `max_rows` rows.
    pub fn scroll_into_view(&mut self, max_rows: usize) {
        let max_rows = max_rows.max(1);
        let max_offset = self.items.len().saturating_sub(max_rows);
        if let Some(i) = self.highlighted {
            if i < self.offset {
                self.offset = i;
            } else if i >= self.offset + max_rows {
                self.offset = i + 1 - max_rows;
            }
        }
        self.offset = self.offset.min(max_offset);
    }

    /// The window of at most `max_rows` items starting at the scroll offset.
    pub fn visible(&self, max_rows: usize) -> (usize, &[Suggestion]) {
        let start = self.offset.min(self.items.len());
        let end = (start + max_rows.max(1)).min(self.items.len());
        (start, &self.items[start..end])
    }
}
