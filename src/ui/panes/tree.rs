//! Syntax tree pane: the outline of an accepted program, or the diagnostic

use crate::parser::Diagnostic;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// What the tree pane shows
pub enum TreeView<'a> {
    Outline(&'a [String]),
    Failure(&'a Diagnostic),
}

/// Render the syntax tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    view: TreeView<'_>,
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
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    match view {
        TreeView::Outline(lines) => {
            let visible_height = area.height.saturating_sub(2).max(1) as usize;
            if lines.len() > visible_height {
                *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
            } else {
                *scroll_offset = 0;
            }

            let visible: Vec<Line> = lines
                .iter()
                .skip(*scroll_offset)
                .take(visible_height)
                .map(|line| outline_line(line))
                .collect();

            frame.render_widget(Paragraph::new(visible).block(block), area);
        }
        TreeView::Failure(diagnostic) => {
            *scroll_offset = 0;
            let text = vec![
                Line::from(Span::styled(
                    diagnostic.kind.to_string(),
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    diagnostic.message.clone(),
                    Style::default().fg(DEFAULT_THEME.fg),
                )),
            ];
            let paragraph = Paragraph::new(text)
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }
}

/// Production names in the keyword colour, token lines in the default colour.
fn outline_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    let is_production = trimmed.starts_with(|c: char| c.is_ascii_uppercase());

    let style = if is_production {
        Style::default().fg(DEFAULT_THEME.keyword)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    Line::from(vec![
        Span::raw(" ".repeat(indent)),
        Span::styled(trimmed.to_string(), style),
    ])
}
