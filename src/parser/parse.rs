//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the [`Diagnostic`] type it
//! reports, and the token-level helpers every grammar procedure is built from.
//!
//! # Parser Architecture
//!
//! The Parser is a single-lookahead recursive descent recognizer:
//! - This module: Parser struct, diagnostics, helpers and the entry point
//! - `declarations`: `Program`, `Body` and declarations
//! - `statements`: statement lists, assignments, `if`, `while`, `print`
//! - `expressions`: expressions, terms, factors and literals
//!
//! The parser owns its [`Lexer`] and holds exactly one token of lookahead,
//! pulling the next token only when the current one is consumed. The first
//! error of any kind ends the parse.
//!
//! # Limitations
//!
//! Nesting of `if`/`while`/parentheses is handled by host recursion, so
//! pathologically deep input is bounded by the thread's stack size.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;

/// Category of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Illegal character, lone `!`, or out-of-range integer literal
    LexicalError,
    /// The lookahead does not fit the grammar at this point
    SyntaxError,
    /// A `fi`/`od` block is followed by another statement without `;`
    StructuralError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::LexicalError => write!(f, "Lexical Error"),
            DiagnosticKind::SyntaxError => write!(f, "Syntax Error"),
            DiagnosticKind::StructuralError => write!(f, "Structural Error"),
        }
    }
}

/// The single error reported by a failed parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    /// The lookahead `found` is not any of the `expected` kinds.
    pub fn syntax(found: &Token, expected: &[TokenKind]) -> Self {
        Diagnostic {
            kind: DiagnosticKind::SyntaxError,
            message: format!(
                "At {} I see \"{}\" but expected {}",
                found.location,
                found.kind,
                quoted_list(expected)
            ),
            location: found.location,
        }
    }

    /// A statement separator was required at `location`.
    pub fn missing_separator(location: SourceLocation) -> Self {
        Diagnostic {
            kind: DiagnosticKind::StructuralError,
            message: format!("At {} expected \";\" but none found", location),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Diagnostic {}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic {
            kind: DiagnosticKind::LexicalError,
            message: err.to_string(),
            location: err.location,
        }
    }
}

/// `"a"`, `"a" or "b"`, `"a", "b" or "c"`
fn quoted_list(kinds: &[TokenKind]) -> String {
    let quoted: Vec<String> = kinds.iter().map(|k| format!("\"{}\"", k)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Build a syntax tree on success; when false the parser only recognizes
    pub build_tree: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { build_tree: true }
    }
}

impl ParserConfig {
    pub fn recognizer() -> Self {
        Self { build_tree: false }
    }
}

/// Recursive descent parser for MiniLang
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the default configuration (tree building on).
    ///
    /// Fails if the very first token is a lexical error.
    pub fn new(source: &str) -> Result<Self, Diagnostic> {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &str, config: ParserConfig) -> Result<Self, Diagnostic> {
        let mut lexer = Lexer::new(source);
        let current = pull(&mut lexer)?;
        Ok(Self {
            lexer,
            current,
            config,
        })
    }

    /// Parse the entire program.
    ///
    /// Returns the syntax tree when tree building is enabled, `None` when the
    /// parser runs as a pure recognizer.
    pub fn parse(mut self) -> Result<Option<SyntaxNode>, Diagnostic> {
        let program = self.parse_program()?;

        if !self.check(TokenKind::EndOfInput) {
            return Err(Diagnostic::syntax(&self.current, &[TokenKind::EndOfInput]));
        }

        Ok(self.config.build_tree.then_some(program))
    }

    // ===== Helper methods =====

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current.kind)
    }

    /// Consume the lookahead unconditionally and pull the next token.
    pub(crate) fn advance(&mut self) -> Result<Token, Diagnostic> {
        let next = pull(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume the lookahead if it has the expected kind, else fail.
    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    /// Syntax error at the lookahead, listing the kinds that would have fit.
    pub(crate) fn unexpected(&self, expected: &[TokenKind]) -> Diagnostic {
        Diagnostic::syntax(&self.current, expected)
    }

    pub(crate) fn attach_token(&self, parent: &mut SyntaxNode, token: Token) {
        if self.config.build_tree {
            parent.children.push(SyntaxElement::Token(token));
        }
    }

    pub(crate) fn attach_node(&self, parent: &mut SyntaxNode, node: SyntaxNode) {
        if self.config.build_tree {
            parent.children.push(SyntaxElement::Node(node));
        }
    }
}

/// Next token from the lexer, with a lexical failure turned into a diagnostic.
fn pull(lexer: &mut Lexer) -> Result<Token, Diagnostic> {
    let token = lexer.next_token();
    if token.kind == TokenKind::Invalid {
        if let Some(err) = lexer.error() {
            return Err(err.clone().into());
        }
    }
    Ok(token)
}

/// Parse `source` in one step, including any error raised while priming.
pub fn parse_source(source: &str, config: ParserConfig) -> Result<Option<SyntaxNode>, Diagnostic> {
    Parser::with_config(source, config)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tree(source: &str) -> SyntaxNode {
        Parser::new(source).unwrap().parse().unwrap().unwrap()
    }

    fn parse_err(source: &str) -> Diagnostic {
        parse_source(source, ParserConfig::default()).unwrap_err()
    }

    #[test]
    fn test_parse_simple_program() {
        let program = parse_tree("program p : int x ; x := 1 ; print x end");

        assert_eq!(program.production, Production::Program);
        assert_eq!(program.tokens().next().and_then(|t| t.text()), Some("p"));

        let declarations: Vec<_> = program
            .nodes()
            .filter(|n| n.production == Production::Declaration)
            .collect();
        assert_eq!(declarations.len(), 1);

        let statements = program.child(Production::Statements).unwrap();
        let kinds: Vec<Production> = statements.nodes().map(|n| n.production).collect();
        assert_eq!(kinds, vec![Production::Assignment, Production::Print]);
    }

    #[test]
    fn test_recognizer_mode_returns_no_tree() {
        let result = parse_source("program p : x := 1 end", ParserConfig::recognizer());
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_reparse_is_deterministic() {
        let source = "program p : while x < 10 do x := x + 1 od end";
        assert_eq!(parse_tree(source), parse_tree(source));
    }

    #[test]
    fn test_missing_expression_after_assign() {
        let err = parse_err("program p : x := ; end");

        assert_eq!(err.kind, DiagnosticKind::SyntaxError);
        assert_eq!(err.location, SourceLocation::new(1, 18));
        assert!(err.message.starts_with("At (Line: 1, Pos: 18) I see \";\" but expected"));
    }

    #[test]
    fn test_match_failure_message() {
        let err = parse_err("program : x := 1 end");

        assert_eq!(
            err.message,
            "At (Line: 1, Pos: 9) I see \":\" but expected \"ID\""
        );
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_err("program p : x := 1 end x");

        assert_eq!(err.kind, DiagnosticKind::SyntaxError);
        assert_eq!(
            err.message,
            "At (Line: 1, Pos: 24) I see \"ID\" but expected \"end-of-text\""
        );
    }

    #[test]
    fn test_lexical_error_while_priming() {
        let err = Parser::new("$program").err().unwrap();

        assert_eq!(err.kind, DiagnosticKind::LexicalError);
        assert_eq!(err.message, "Illegal Character Found: '$' at (Line: 1, Pos: 1)");
    }

    #[test]
    fn test_lexical_error_mid_parse() {
        let err = parse_err("program p :\n  x := 1 ! 2\nend");

        assert_eq!(err.kind, DiagnosticKind::LexicalError);
        assert_eq!(err.location, SourceLocation::new(2, 10));
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&[TokenKind::Fi]), "\"fi\"");
        assert_eq!(
            quoted_list(&[TokenKind::Bool, TokenKind::Int]),
            "\"bool\" or \"int\""
        );
        assert_eq!(
            quoted_list(&[TokenKind::Identifier, TokenKind::If, TokenKind::While]),
            "\"ID\", \"if\" or \"while\""
        );
    }
}
