//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! Statements  := Statement { ";" Statement }
//! Statement   := Assignment | Conditional | Iterative | Print
//! Assignment  := ID ":=" Expr
//! Conditional := "if" Expr "then" Body [ "else" Body ] "fi"
//! Iterative   := "while" Expr "do" Body "od"
//! Print       := "print" Expr
//! ```
//!
//! A block closed by `fi` or `od` that is directly followed by another
//! statement reports a dedicated missing-separator error instead of a plain
//! token mismatch.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Diagnostic, Parser};

/// Tokens that can begin a statement
pub(crate) const STATEMENT_START: [TokenKind; 4] = [
    TokenKind::Identifier,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Print,
];

impl Parser {
    /// Parse a `;`-separated statement list
    pub(crate) fn parse_statements(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Statements);

        let statement = self.parse_statement()?;
        self.attach_node(&mut node, statement);

        while self.check(TokenKind::Semicolon) {
            self.advance()?;
            let statement = self.parse_statement()?;
            self.attach_node(&mut node, statement);
        }

        Ok(node)
    }

    /// Parse a statement
    fn parse_statement(&mut self) -> Result<SyntaxNode, Diagnostic> {
        match self.peek_kind() {
            TokenKind::Identifier => self.parse_assignment(),
            TokenKind::If => self.parse_conditional(),
            TokenKind::While => self.parse_iterative(),
            TokenKind::Print => self.parse_print(),
            _ => Err(self.unexpected(&STATEMENT_START)),
        }
    }

    /// Parse `ID := Expr`
    fn parse_assignment(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Assignment);

        let target = self.expect_kind(TokenKind::Identifier)?;
        self.attach_token(&mut node, target);
        self.expect_kind(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        self.attach_node(&mut node, value);

        Ok(node)
    }

    /// Parse `if Expr then Body [else Body] fi`
    fn parse_conditional(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Conditional);

        self.expect_kind(TokenKind::If)?;
        let condition = self.parse_expression()?;
        self.attach_node(&mut node, condition);
        self.expect_kind(TokenKind::Then)?;
        self.parse_body(&mut node)?;

        if self.check(TokenKind::Else) {
            let else_token = self.advance()?;
            self.attach_token(&mut node, else_token);
            self.parse_body(&mut node)?;
        }

        self.expect_block_end(TokenKind::Fi)?;
        Ok(node)
    }

    /// Parse `while Expr do Body od`
    fn parse_iterative(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Iterative);

        self.expect_kind(TokenKind::While)?;
        let condition = self.parse_expression()?;
        self.attach_node(&mut node, condition);
        self.expect_kind(TokenKind::Do)?;
        self.parse_body(&mut node)?;

        self.expect_block_end(TokenKind::Od)?;
        Ok(node)
    }

    /// Parse `print Expr`
    fn parse_print(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Print);

        self.expect_kind(TokenKind::Print)?;
        let value = self.parse_expression()?;
        self.attach_node(&mut node, value);

        Ok(node)
    }

    /// Match a block closer and require `;` if another statement follows it.
    fn expect_block_end(&mut self, closer: TokenKind) -> Result<(), Diagnostic> {
        let token = self.expect_kind(closer)?;

        if self.check_any(&STATEMENT_START) {
            let after = token.location.shifted(token.width());
            return Err(Diagnostic::missing_separator(after));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse_source, Diagnostic, DiagnosticKind, ParserConfig};

    fn tree(source: &str) -> SyntaxNode {
        parse_source(source, ParserConfig::default()).unwrap().unwrap()
    }

    fn error(source: &str) -> Diagnostic {
        parse_source(source, ParserConfig::default()).unwrap_err()
    }

    fn statement_kinds(node: &SyntaxNode) -> Vec<Production> {
        node.child(Production::Statements)
            .unwrap()
            .nodes()
            .map(|n| n.production)
            .collect()
    }

    #[test]
    fn test_statement_order_preserved() {
        let program = tree("program p : x := 1; if x then print x fi; while x do x := 0 od; print 2 end");

        assert_eq!(
            statement_kinds(&program),
            vec![
                Production::Assignment,
                Production::Conditional,
                Production::Iterative,
                Production::Print,
            ]
        );
    }

    #[test]
    fn test_conditional_with_else() {
        let program = tree("program p : if a < b then int t; t := a else print b fi end");
        let conditional = program
            .child(Production::Statements)
            .and_then(|s| s.child(Production::Conditional))
            .unwrap();

        let shape: Vec<String> = conditional
            .children
            .iter()
            .map(|c| match c {
                SyntaxElement::Node(n) => n.production.to_string(),
                SyntaxElement::Token(t) => t.kind.to_string(),
            })
            .collect();
        assert_eq!(
            shape,
            vec!["Expression", "Declaration", "Statements", "else", "Statements"]
        );
    }

    #[test]
    fn test_block_as_last_statement_needs_no_separator() {
        assert!(parse_source(
            "program p : while x do if x then x := 0 fi od end",
            ParserConfig::recognizer()
        )
        .is_ok());
        assert!(parse_source(
            "program p : if x then print 1 else while y do y := 0 od fi end",
            ParserConfig::recognizer()
        )
        .is_ok());
    }

    #[test]
    fn test_missing_separator_after_fi() {
        let err = error("program p : if true then print 1 fi print 2 end");

        assert_eq!(err.kind, DiagnosticKind::StructuralError);
        // `fi` occupies columns 34-35
        assert_eq!(err.location, SourceLocation::new(1, 36));
        assert_eq!(err.message, "At (Line: 1, Pos: 36) expected \";\" but none found");
    }

    #[test]
    fn test_missing_separator_after_od() {
        let err = error("program p :\nwhile x do x := 0 od\nx := 1\nend");

        assert_eq!(err.kind, DiagnosticKind::StructuralError);
        assert_eq!(err.location, SourceLocation::new(2, 21));
    }

    #[test]
    fn test_missing_separator_after_plain_statement_is_syntax_error() {
        let err = error("program p : x := 1 print x end");

        assert_eq!(err.kind, DiagnosticKind::SyntaxError);
        assert_eq!(err.location, SourceLocation::new(1, 20));
    }

    #[test]
    fn test_trailing_separator_rejected() {
        let err = error("program p : print 1; end");

        assert_eq!(err.kind, DiagnosticKind::SyntaxError);
        assert_eq!(err.location, SourceLocation::new(1, 22));
    }

    #[test]
    fn test_unclosed_block() {
        let err = error("program p : if x then print 1 end");

        assert_eq!(
            err.message,
            "At (Line: 1, Pos: 31) I see \"end\" but expected \"fi\""
        );
    }
}
