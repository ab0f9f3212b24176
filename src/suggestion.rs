//! Suggestion records and matched-substring highlighting.
//!
//! A [`Suggestion`] is one candidate result shown as a row in the popup. It is
//! produced by a [`SuggestionProvider`](crate::provider::SuggestionProvider)
//! and never mutated afterwards; every new result set replaces the previous
//! one wholesale.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_suggest::suggestion::{segments, HighlightRange, Suggestion};
//!
//! let s = Suggestion::new("Paris")
//!     .with_subtitle("France")
//!     .with_title_highlights(vec![HighlightRange::new(0, 3)]);
//!
//! let runs = segments(&s.title, &s.title_highlights);
//! assert_eq!(runs, vec![("Par".to_string(), true), ("is".to_string(), false)]);
//! ```

/// A `(start, len)` span of characters to emphasise inside a string.
///
/// Offsets count `char`s, not bytes, so ranges stay valid for non-ASCII
/// titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightRange {
    /// Index of the first highlighted character.
    pub start: usize,
    /// Number of highlighted characters.
    pub len: usize,
}

impl HighlightRange {
    /// Creates a range covering `len` characters starting at `start`.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last highlighted character.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Collapses sorted character indices into contiguous ranges.
    ///
    /// Fuzzy matchers report individual matched positions; consecutive
    /// positions become a single range.
    ///
    /// ```rust
    /// use bubbletea_suggest::suggestion::HighlightRange;
    ///
    /// let ranges = HighlightRange::from_indices(&[0, 1, 2, 5]);
    /// assert_eq!(ranges, vec![HighlightRange::new(0, 3), HighlightRange::new(5, 1)]);
    /// ```
    pub fn from_indices(indices: &[usize]) -> Vec<HighlightRange> {
        let mut ranges: Vec<HighlightRange> = Vec::new();
        for &index in indices {
            match ranges.last_mut() {
                Some(last) if last.end() == index => last.len += 1,
                Some(last) if index < last.end() => {}
                _ => ranges.push(HighlightRange::new(index, 1)),
            }
        }
        ranges
    }
}

/// One candidate result displayed as a popup row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestion {
    /// Main text; written into the input field on highlight and commit.
    pub title: String,
    /// Secondary text shown after the title. May be empty.
    pub subtitle: String,
    /// Matched spans inside `title`.
    pub title_highlights: Vec<HighlightRange>,
    /// Matched spans inside `subtitle`.
    pub subtitle_highlights: Vec<HighlightRange>,
    /// Opaque icon reference, rendered as a leading glyph when present.
    pub icon: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the highlighted spans of the title.
    pub fn with_title_highlights(mut self, ranges: Vec<HighlightRange>) -> Self {
        self.title_highlights = ranges;
        self
    }

    /// Sets the highlighted spans of the subtitle.
    pub fn with_subtitle_highlights(mut self, ranges: Vec<HighlightRange>) -> Self {
        self.subtitle_highlights = ranges;
        self
    }

    /// Sets the icon reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Title length in characters.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

/// Splits `text` into ordered `(run, highlighted)` pieces.
///
/// Ranges are clamped to the text, empty ranges are ignored and overlapping or
/// adjacent ranges merge. Concatenating the runs always yields `text`.
pub fn segments(text: &str, ranges: &[HighlightRange]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();

    let mut spans: Vec<(usize, usize)> = ranges
        .iter()
        .map(|r| (r.start.min(total), r.end().min(total)))
        .filter(|(start, end)| start < end)
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut out = Vec::with_capacity(merged.len() * 2 + 1);
    let mut cursor = 0;
    for (start, end) in merged {
        if cursor < start {
            out.push((chars[cursor..start].iter().collect(), false));
        }
        out.push((chars[start..end].iter().collect(), true));
        cursor = end;
    }
    if cursor < total {
        out.push((chars[cursor..].iter().collect(), false));
    }
    out
}
