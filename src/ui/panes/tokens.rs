//! Token list pane rendering

use crate::parser::lexer::{Token, TokenKind, TokenValue};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Identifier => Style::default().fg(DEFAULT_THEME.identifier),
        TokenKind::Number | TokenKind::True | TokenKind::False => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::Int | TokenKind::Bool => Style::default().fg(DEFAULT_THEME.type_name),
        TokenKind::Invalid => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        TokenKind::EndOfInput => Style::default().fg(DEFAULT_THEME.comment),
        kind if kind.is_keyword() => Style::default().fg(DEFAULT_THEME.keyword),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// One row of the list: position, kind and value columns.
pub fn token_row(token: &Token) -> Line<'static> {
    let value = match &token.value {
        TokenValue::Text(text) => text.clone(),
        TokenValue::Integer(n) => n.to_string(),
        TokenValue::Empty => String::new(),
    };

    Line::from(vec![
        Span::styled(
            format!("{:>4}:{:<4}", token.line(), token.column()),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!("{:<12}", token.kind.spelling()), kind_style(token.kind)),
        Span::raw(value),
    ])
}

/// Keep `selected` inside the window starting at `offset`.
pub fn follow_selection(offset: usize, selected: usize, visible_height: usize) -> usize {
    if selected < offset {
        selected
    } else if selected >= offset + visible_height {
        selected + 1 - visible_height
    } else {
        offset
    }
}

/// Render the token list pane
pub fn render_token_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = follow_selection(*scroll_offset, selected, visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let item = ListItem::new(token_row(token));
            if idx == selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.selection_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
