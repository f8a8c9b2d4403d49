// Syntax tree definitions for the MiniLang recognizer

use super::lexer::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location `width` columns further along the same line.
    pub fn shifted(self, width: usize) -> Self {
        Self::new(self.line, self.column + width)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Line: {}, Pos: {})", self.line, self.column)
    }
}

/// Grammar productions that appear as tree nodes.
///
/// `Body` and `Declarations` are spliced into their parent and have no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Program,
    Declaration,
    Statements,
    Assignment,
    Conditional,
    Iterative,
    Print,
    Expression,
    SimpleExpression,
    Term,
    Factor,
    Literal,
}

impl Production {
    pub fn name(self) -> &'static str {
        match self {
            Production::Program => "Program",
            Production::Declaration => "Declaration",
            Production::Statements => "Statements",
            Production::Assignment => "Assignment",
            Production::Conditional => "Conditional",
            Production::Iterative => "Iterative",
            Production::Print => "Print",
            Production::Expression => "Expression",
            Production::SimpleExpression => "SimpleExpression",
            Production::Term => "Term",
            Production::Factor => "Factor",
            Production::Literal => "Literal",
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A child of a [`SyntaxNode`]: either a token kept from the source or a nested node
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxElement {
    Token(Token),
    Node(SyntaxNode),
}

/// Node of the syntax tree produced by an accepting parse
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub production: Production,
    pub children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    pub fn new(production: Production) -> Self {
        Self {
            production,
            children: Vec::new(),
        }
    }

    /// Direct child nodes, in source order.
    pub fn nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|child| match child {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        })
    }

    /// Direct child tokens, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|child| match child {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        })
    }

    /// First direct child node with the given production.
    pub fn child(&self, production: Production) -> Option<&SyntaxNode> {
        self.nodes().find(|node| node.production == production)
    }

    /// Location of the first token anywhere under this node.
    pub fn location(&self) -> Option<SourceLocation> {
        self.children.iter().find_map(|child| match child {
            SyntaxElement::Token(token) => Some(token.location),
            SyntaxElement::Node(node) => node.location(),
        })
    }

    /// Indented, one-line-per-element rendering of the tree.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(0, &mut lines);
        lines
    }

    fn outline_into(&self, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), self.production));
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.outline_into(depth + 1, lines),
                SyntaxElement::Token(token) => {
                    lines.push(format!("{}{}", "  ".repeat(depth + 1), token))
                }
            }
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.outline() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
