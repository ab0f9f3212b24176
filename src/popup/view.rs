//! Rendering of the popup rows.

use super::model::{Model, Phase};
use crate::field::InputField;
use crate::provider::SuggestionProvider;
use crate::suggestion::{segments, Suggestion};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Styles used by [`Model::view`].
#[derive(Debug, Clone)]
pub struct PopupStyles {
    /// Title of an idle row.
    pub title: Style,
    /// Title of the highlighted row.
    pub selected_title: Style,
    /// Subtitle of an idle row.
    pub subtitle: Style,
    /// Subtitle of the highlighted row.
    pub selected_subtitle: Style,
    /// Icon glyph.
    pub icon: Style,
    /// Busy indicator.
    pub busy: Style,
    /// Text shown next to the busy indicator.
    pub loading_text: String,
    /// Separator between title and subtitle.
    pub separator: String,
}

impl Default for PopupStyles {
    fn default() -> Self {
        Self {
            title: Style::new().foreground(Color::from("#dddddd")),
            selected_title: Style::new()
                .foreground(Color::from("#EE6FF8"))
                .background(Color::from("#3C3C3C")),
            subtitle: Style::new().foreground(Color::from("#777777")),
            selected_subtitle: Style::new()
                .foreground(Color::from("#AD58B4"))
                .background(Color::from("#3C3C3C")),
            icon: Style::new().foreground(Color::from("#04B575")),
            busy: Style::new().foreground(Color::from("#747373")),
            loading_text: "Searching…".to_string(),
            separator: "  ".to_string(),
        }
    }
}

/// A run of text and the style to draw it with.
struct Piece {
    text: String,
    style: Style,
}

/// Cuts pieces so their combined display width fits `width`, ending in an
/// ellipsis when anything was dropped.
fn truncate(pieces: Vec<Piece>, width: Option<usize>) -> Vec<Piece> {
    let Some(width) = width else {
        return pieces;
    };
    let total: usize = pieces
        .iter()
        .flat_map(|p| p.text.chars())
        .map(|c| c.width().unwrap_or(0))
        .sum();
    if total <= width {
        return pieces;
    }

    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut out = Vec::new();
    for piece in pieces {
        let mut text = String::new();
        for c in piece.text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            text.push(c);
        }
        let full = text.chars().count() == piece.text.chars().count();
        let style = piece.style.clone();
        if !text.is_empty() {
            out.push(Piece {
                text,
                style: piece.style,
            });
        }
        if !full {
            if width > 0 {
                out.push(Piece {
                    text: "…".to_string(),
                    style,
                });
            }
            break;
        }
    }
    out
}

impl PopupStyles {
    fn row(&self, suggestion: &Suggestion, selected: bool, width: Option<usize>) -> String {
        let (title_style, subtitle_style) = if selected {
            (&self.selected_title, &self.selected_subtitle)
        } else {
            (&self.title, &self.subtitle)
        };

        let mut pieces = Vec::new();
        if let Some(icon) = &suggestion.icon {
            pieces.push(Piece {
                text: format!("{} ", icon),
                style: self.icon.clone(),
            });
        }
        for (text, matched) in segments(&suggestion.title, &suggestion.title_highlights) {
            let style = title_style.clone().bold(matched);
            pieces.push(Piece { text, style });
        }
        if !suggestion.subtitle.is_empty() {
            pieces.push(Piece {
                text: self.separator.clone(),
                style: subtitle_style.clone(),
            });
            for (text, matched) in segments(&suggestion.subtitle, &suggestion.subtitle_highlights) {
                let style = subtitle_style.clone().bold(matched);
                pieces.push(Piece { text, style });
            }
        }

        truncate(pieces, width)
            .into_iter()
            .map(|p| p.style.render(&p.text))
            .collect()
    }
}

impl<P: SuggestionProvider, F: InputField> Model<P, F> {
    fn row_width(&self) -> Option<usize> {
        self.popup_area()
            .map(|area| usize::from(area.width))
            .filter(|w| *w > 0)
    }

    /// Renders only the popup: nothing when hidden, the busy indicator while
    /// loading, otherwise one line per visible suggestion.
    pub fn popup_view(&self) -> String {
        match self.phase {
            Phase::Hidden => String::new(),
            Phase::Loading => {
                let frame = self.styles.busy.render(self.busy.frame());
                format!("{} {}", frame, self.styles.loading_text)
            }
            Phase::Shown => {
                let width = self.row_width();
                let highlighted = self.list.highlighted_index();
                let (offset, rows) = self.list.visible(self.max_rows);
                rows.iter()
                    .enumerate()
                    .map(|(i, s)| self.styles.row(s, highlighted == Some(offset + i), width))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }

    /// Renders the field with the popup below it.
    pub fn view(&self) -> String {
        let field = self.field.view();
        let popup = self.popup_view();
        if popup.is_empty() {
            field
        } else {
            format!("{}\n{}", field, popup)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::HighlightRange;

    fn plain(s: String) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_row_joins_title_and_subtitle() {
        let styles = PopupStyles::default();
        let s = Suggestion::new("Paris")
            .with_subtitle("France")
            .with_title_highlights(vec![HighlightRange::new(0, 3)]);
        assert_eq!(plain(styles.row(&s, false, None)), "Paris  France");
        assert_eq!(plain(styles.row(&s, true, None)), "Paris  France");
    }

    #[test]
    fn test_row_with_icon() {
        let styles = PopupStyles::default();
        let s = Suggestion::new("Rome").with_icon("*");
        assert_eq!(plain(styles.row(&s, false, None)), "* Rome");
    }

    #[test]
    fn test_row_truncates_to_width() {
        let styles = PopupStyles::default();
        let s = Suggestion::new("Park City").with_subtitle("Utah");
        assert_eq!(plain(styles.row(&s, false, Some(6))), "Park …");
        assert_eq!(plain(styles.row(&s, false, Some(15))), "Park City  Utah");
    }
}
