//! Source code pane rendering with syntax highlighting
//!
//! Displays the program being inspected with line numbers and keyword
//! highlighting. The line holding the selected token gets a background, the
//! token itself is drawn reversed, and the column of a diagnostic is marked in
//! the error colour.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::{keyword, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Locations to emphasise in the source pane
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceMarks {
    /// Start and width of the selected token
    pub selected: Option<(SourceLocation, usize)>,
    pub error: Option<SourceLocation>,
}

/// Scroll state for the source pane
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceScrollState {
    pub offset: usize,
}

impl SourceScrollState {
    /// Move the window so that 1-based `line` is visible.
    pub fn reveal(&mut self, line: usize, visible_height: usize) {
        let idx = line.saturating_sub(1);
        if idx < self.offset {
            self.offset = idx;
        } else if idx >= self.offset + visible_height {
            self.offset = idx + 1 - visible_height;
        }
    }
}

/// Per-character styles for one line of MiniLang source.
fn highlight_line(chars: &[char]) -> Vec<Style> {
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); chars.len()];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            for style in &mut styles[i..] {
                *style = Style::default().fg(DEFAULT_THEME.comment);
            }
            break;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let style = word_style(&word);
            for slot in &mut styles[start..i] {
                *slot = style;
            }
            continue;
        }

        if c.is_ascii_digit() {
            styles[i] = Style::default().fg(DEFAULT_THEME.number);
        } else if matches!(c, '(' | ')') {
            styles[i] = Style::default().fg(DEFAULT_THEME.primary);
        }
        i += 1;
    }

    styles
}

fn word_style(word: &str) -> Style {
    match keyword(word) {
        Some(TokenKind::Int | TokenKind::Bool) => Style::default().fg(DEFAULT_THEME.type_name),
        Some(TokenKind::True | TokenKind::False) => Style::default().fg(DEFAULT_THEME.number),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.identifier),
    }
}

/// Collapse runs of equally styled characters into spans.
fn group_spans(chars: &[char], styles: &[Style]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut start = 0;

    for i in 1..=chars.len() {
        if i == chars.len() || styles[i] != styles[start] {
            let text: String = chars[start..i].iter().collect();
            spans.push(Span::styled(text, styles[start]));
            start = i;
        }
    }

    spans
}

/// Styled content of 1-based line `line_num`.
fn render_line(line: &str, line_num: usize, marks: &SourceMarks) -> Vec<Span<'static>> {
    let mut chars: Vec<char> = line.chars().collect();
    let mut styles = highlight_line(&chars);

    if let Some((loc, width)) = marks.selected {
        if loc.line == line_num {
            for style in &mut styles {
                *style = style.bg(DEFAULT_THEME.current_line_bg);
            }
            let start = loc.column.saturating_sub(1);
            for style in styles.iter_mut().skip(start).take(width.max(1)) {
                *style = style.bg(DEFAULT_THEME.selection_bg).add_modifier(Modifier::BOLD);
            }
        }
    }

    if let Some(loc) = marks.error {
        if loc.line == line_num {
            let col = loc.column.saturating_sub(1);
            // Errors reported past the last character still get a visible cell
            while chars.len() <= col {
                chars.push(' ');
                styles.push(Style::default());
            }
            styles[col] = Style::default()
                .bg(DEFAULT_THEME.error)
                .fg(ratatui::style::Color::Black)
                .add_modifier(Modifier::BOLD);
        }
    }

    group_spans(&chars, &styles)
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    marks: SourceMarks,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if let Some((loc, _)) = marks.selected {
        scroll_state.reveal(loc.line, visible_height);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let selected_line = marks.selected.map(|(loc, _)| loc.line);
    let error_line = marks.error.map(|loc| loc.line);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let num_style = if Some(line_num) == error_line {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if Some(line_num) == selected_line {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(render_line(line, line_num, &marks));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_identifiers_styled_differently() {
        let chars: Vec<char> = "if x".chars().collect();
        let styles = highlight_line(&chars);

        assert_eq!(styles[0], styles[1]);
        assert_ne!(styles[0], styles[3]);
        assert!(styles[0].add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_comment_covers_rest_of_line() {
        let chars: Vec<char> = "x // y".chars().collect();
        let styles = highlight_line(&chars);
        let comment = Style::default().fg(DEFAULT_THEME.comment);

        assert!(styles[2..].iter().all(|s| *s == comment));
    }

    #[test]
    fn test_group_spans_round_trip_text() {
        let line = "while x do print 1 od";
        let spans = render_line(line, 1, &SourceMarks::default());
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, line);
    }

    #[test]
    fn test_error_past_end_of_line_is_padded() {
        let marks = SourceMarks {
            selected: None,
            error: Some(SourceLocation::new(1, 6)),
        };
        let spans = render_line("fi", 1, &marks);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.chars().count(), 6);
    }

    #[test]
    fn test_reveal_scrolls_both_ways() {
        let mut scroll = SourceScrollState { offset: 10 };
        scroll.reveal(3, 5);
        assert_eq!(scroll.offset, 2);
        scroll.reveal(20, 5);
        assert_eq!(scroll.offset, 15);
    }
}
