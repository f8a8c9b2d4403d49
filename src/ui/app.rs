//! Inspector application state and event loop

use crate::parser::ast::{Production, SourceLocation, SyntaxNode};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::{parse_source, Diagnostic, ParserConfig};
use crate::ui::panes::{self, SourceMarks, SourceScrollState, TreeView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// Result of parsing the inspected source
#[derive(Debug, Clone)]
pub enum Outcome {
    Accepted(SyntaxNode),
    Rejected(Diagnostic),
}

/// Scan `source` to the end, keeping the `Invalid` token of a lexical error.
fn scan_tokens(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EndOfInput;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being inspected
    pub source_code: String,

    /// Every token of the source, ending with `EndOfInput`
    pub tokens: Vec<Token>,

    pub outcome: Outcome,

    /// Tree outline, rendered once
    tree_lines: Vec<String>,

    /// Line number -> indices of the tokens starting on it
    line_tokens: FxHashMap<usize, Vec<usize>>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `tokens`
    pub selected: usize,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub token_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Scan and parse `source_code` and set up the initial view
    pub fn new(source_code: String) -> Self {
        let tokens = scan_tokens(&source_code);

        let outcome = match parse_source(&source_code, ParserConfig::default()) {
            Ok(tree) => {
                Outcome::Accepted(tree.unwrap_or_else(|| SyntaxNode::new(Production::Program)))
            }
            Err(diagnostic) => Outcome::Rejected(diagnostic),
        };

        let tree_lines = match &outcome {
            Outcome::Accepted(tree) => tree.outline(),
            Outcome::Rejected(_) => Vec::new(),
        };

        let mut line_tokens: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for (idx, token) in tokens.iter().enumerate() {
            line_tokens.entry(token.line()).or_default().push(idx);
        }

        let status_message = match &outcome {
            Outcome::Accepted(_) => String::from("Program accepted"),
            Outcome::Rejected(diagnostic) => diagnostic.message.clone(),
        };

        App {
            source_code,
            tokens,
            outcome,
            tree_lines,
            line_tokens,
            focused_pane: FocusedPane::Source,
            selected: 0,
            source_scroll: SourceScrollState::default(),
            token_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, Outcome::Accepted(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match &self.outcome {
            Outcome::Rejected(diagnostic) => Some(diagnostic),
            Outcome::Accepted(_) => None,
        }
    }

    pub fn selected_token(&self) -> Option<&Token> {
        self.tokens.get(self.selected)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left: source; right: tokens over tree
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let marks = SourceMarks {
            selected: self
                .selected_token()
                .map(|token| (token.location, token.width())),
            error: self.diagnostic().map(|d| d.location),
        };

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            marks,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_token_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.selected,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        let view = match &self.outcome {
            Outcome::Accepted(_) => TreeView::Outline(&self.tree_lines),
            Outcome::Rejected(diagnostic) => TreeView::Failure(diagnostic),
        };
        panes::render_tree_pane(
            frame,
            right_rows[1],
            view,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.is_accepted(),
            self.selected,
            self.tokens.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => self.select(self.selected.saturating_sub(1)),
            KeyCode::Right => self.select(self.selected + 1),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => self.select_line(false),
                FocusedPane::Tokens => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Tree => self.tree_scroll = self.tree_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => self.select_line(true),
                FocusedPane::Tokens => self.select(self.selected + 1),
                FocusedPane::Tree => self.tree_scroll = self.tree_scroll.saturating_add(1),
            },
            KeyCode::Enter | KeyCode::End => {
                self.select(self.tokens.len().saturating_sub(1));
                self.status_message = "Jumped to last token".to_string();
            }
            KeyCode::Backspace | KeyCode::Home => {
                self.select(0);
                self.status_message = "Jumped to first token".to_string();
            }
            KeyCode::Char('e') => self.jump_to_error(),
            _ => {}
        }
    }

    /// Select token `idx`, clamped to the token list
    fn select(&mut self, idx: usize) {
        self.selected = idx.min(self.tokens.len().saturating_sub(1));
    }

    /// Select the first token of the next (or previous) line that has tokens
    fn select_line(&mut self, forward: bool) {
        let Some(current) = self.selected_token().map(|t| t.line()) else {
            return;
        };
        let last_line = self.tokens.last().map(|t| t.line()).unwrap_or(current);

        let mut line = current;
        loop {
            line = if forward {
                if line >= last_line {
                    return;
                }
                line + 1
            } else {
                if line <= 1 {
                    return;
                }
                line - 1
            };

            if let Some(first) = self.line_tokens.get(&line).and_then(|idxs| idxs.first()) {
                self.selected = *first;
                return;
            }
        }
    }

    /// Select the first token at or after the diagnostic's location
    fn jump_to_error(&mut self) {
        let Some(location) = self.diagnostic().map(|d| d.location) else {
            self.status_message = "No error to jump to".to_string();
            return;
        };

        let idx = first_token_at_or_after(&self.tokens, location);
        self.select(idx);
        self.status_message = format!("Error at {}", location);
    }
}

fn first_token_at_or_after(tokens: &[Token], location: SourceLocation) -> usize {
    tokens.partition_point(|token| token.location < location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_accepted_program() {
        let app = App::new("program p : print 1 end".to_string());

        assert!(app.is_accepted());
        assert_eq!(app.tokens.len(), 7);
        assert_eq!(app.tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
        assert_eq!(app.tree_lines.first().map(String::as_str), Some("Program"));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = App::new("program p : print 1 end".to_string());

        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected, 0);

        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected, 6);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected, 6);
    }

    #[test]
    fn test_line_navigation_skips_blank_lines() {
        let mut app = App::new("program p :\n\n\n  x := 1\nend".to_string());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token().map(|t| t.line()), Some(4));
        assert_eq!(app.selected_token().and_then(|t| t.text()), Some("x"));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token().map(|t| t.kind), Some(TokenKind::End));

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_jump_to_structural_error() {
        let mut app = App::new("program p : if true then print 1 fi print 2 end".to_string());

        assert!(!app.is_accepted());
        press(&mut app, KeyCode::Char('e'));
        // first token after `fi` is the second `print`
        assert_eq!(app.selected_token().map(|t| t.kind), Some(TokenKind::Print));
        assert_eq!(app.selected_token().map(|t| t.column()), Some(37));
    }

    #[test]
    fn test_lexical_error_keeps_invalid_token() {
        let app = App::new("program p : x := 1 # 2 end".to_string());

        let kinds: Vec<TokenKind> = app.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[kinds.len() - 2], TokenKind::Invalid);
        assert_eq!(kinds[kinds.len() - 1], TokenKind::EndOfInput);
        assert!(app.diagnostic().is_some());
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = App::new("program p : print 1 end".to_string());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = App::new("program p :\n  int x;\n  x := 1 // set\nend".to_string());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Source Code"));
        assert!(text.contains("ACCEPTED"));
    }
}
