//! Expression parsing implementation
//!
//! Three precedence levels, each a loop over its operator set, with an
//! optional unary prefix on factors:
//!
//! ```text
//! Expr       := SimpleExpr [ RelOp SimpleExpr ]       RelOp   ∈ { < > <= >= = != }
//! SimpleExpr := Term { AddOp Term }                   AddOp   ∈ { + - or }
//! Term       := Factor { MulOp Factor }               MulOp   ∈ { * / and }
//! Factor     := [ UnaryOp ] ( Literal | ID | "(" Expr ")" )   UnaryOp ∈ { - not }
//! Literal    := NUM | "true" | "false"
//! ```
//!
//! Relational operators do not chain: `a < b < c` stops after `a < b`.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Diagnostic, Parser};

const RELATIONAL_OPS: [TokenKind; 6] = [
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEq,
    TokenKind::GreaterEq,
    TokenKind::Equal,
    TokenKind::NotEqual,
];
const ADDITIVE_OPS: [TokenKind; 3] = [TokenKind::Plus, TokenKind::Minus, TokenKind::Or];
const MULTIPLICATIVE_OPS: [TokenKind; 3] = [TokenKind::Star, TokenKind::Slash, TokenKind::And];
const UNARY_OPS: [TokenKind; 2] = [TokenKind::Minus, TokenKind::Not];

/// Tokens that can begin a factor once any unary operator is consumed
const OPERAND_START: [TokenKind; 5] = [
    TokenKind::Number,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Identifier,
    TokenKind::LParen,
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Expression);

        let left = self.parse_simple_expression()?;
        self.attach_node(&mut node, left);

        if self.check_any(&RELATIONAL_OPS) {
            let op = self.advance()?;
            self.attach_token(&mut node, op);
            let right = self.parse_simple_expression()?;
            self.attach_node(&mut node, right);
        }

        Ok(node)
    }

    /// Parse additive level (`+`, `-`, `or`)
    fn parse_simple_expression(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::SimpleExpression);

        let first = self.parse_term()?;
        self.attach_node(&mut node, first);

        while self.check_any(&ADDITIVE_OPS) {
            let op = self.advance()?;
            self.attach_token(&mut node, op);
            let next = self.parse_term()?;
            self.attach_node(&mut node, next);
        }

        Ok(node)
    }

    /// Parse multiplicative level (`*`, `/`, `and`)
    fn parse_term(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Term);

        let first = self.parse_factor()?;
        self.attach_node(&mut node, first);

        while self.check_any(&MULTIPLICATIVE_OPS) {
            let op = self.advance()?;
            self.attach_token(&mut node, op);
            let next = self.parse_factor()?;
            self.attach_node(&mut node, next);
        }

        Ok(node)
    }

    /// Parse factor: optional unary operator, then literal, identifier or group
    fn parse_factor(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Factor);

        if self.check_any(&UNARY_OPS) {
            let op = self.advance()?;
            self.attach_token(&mut node, op);
        }

        match self.peek_kind() {
            TokenKind::Number | TokenKind::True | TokenKind::False => {
                let literal = self.parse_literal()?;
                self.attach_node(&mut node, literal);
            }
            TokenKind::Identifier => {
                let name = self.advance()?;
                self.attach_token(&mut node, name);
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.attach_node(&mut node, inner);
                self.expect_kind(TokenKind::RParen)?;
            }
            _ => return Err(self.unexpected(&OPERAND_START)),
        }

        Ok(node)
    }

    /// Parse `NUM`, `true` or `false`
    fn parse_literal(&mut self) -> Result<SyntaxNode, Diagnostic> {
        let mut node = SyntaxNode::new(Production::Literal);

        let token = match self.peek_kind() {
            TokenKind::Number | TokenKind::True | TokenKind::False => self.advance()?,
            _ => return Err(self.unexpected(&OPERAND_START[..3])),
        };
        self.attach_token(&mut node, token);

        Ok(node)
    }
}
