//! Program and declaration parsing
//!
//! # Grammar
//!
//! ```text
//! Program      := "program" ID ":" Body "end"
//! Body         := [ Declarations ] Statements
//! Declarations := Declaration { Declaration }
//! Declaration  := ("bool" | "int") ID ";"
//! ```
//!
//! `Body` has no node of its own: its declarations and statement list are
//! attached directly to the enclosing `Program`, `Conditional` or `Iterative`.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Diagnostic, Parser};

const DECLARATION_START: [TokenKind; 2] = [TokenKind::Bool, TokenKind::Int];

impl Parser {
    /// Parse `program ID : Body end`
    pub(crate) fn parse_program(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Program);

        self.expect_kind(TokenKind::Program)?;
        let name = self.expect_kind(TokenKind::Identifier)?;
        self.attach_token(&mut node, name);
        self.expect_kind(TokenKind::Colon)?;
        self.parse_body(&mut node)?;
        self.expect_kind(TokenKind::End)?;

        Ok(node)
    }

    /// Parse a body into `parent`
    pub(crate) fn parse_body(&mut self, parent: &mut SyntaxNode) -> Result<(), Diagnostic> {
        if self.check_any(&DECLARATION_START) {
            self.parse_declarations(parent)?;
        }

        let statements = self.parse_statements()?;
        self.attach_node(parent, statements);
        Ok(())
    }

    fn parse_declarations(&mut self, parent: &mut SyntaxNode) -> Result<(), Diagnostic> {
        loop {
            let declaration = self.parse_declaration()?;
            self.attach_node(parent, declaration);

            if !self.check_any(&DECLARATION_START) {
                return Ok(());
            }
        }
    }

    /// Parse `int x ;` or `bool x ;`
    fn parse_declaration(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Declaration);

        let type_token = match self.peek_kind() {
            TokenKind::Bool | TokenKind::Int => self.advance()?,
            _ => return Err(self.unexpected(&DECLARATION_START)),
        };
        self.attach_token(&mut node, type_token);

        let name = self.expect_kind(TokenKind::Identifier)?;
        self.attach_token(&mut node, name);
        self.expect_kind(TokenKind::Semicolon)?;

        Ok(node)
    }
}
