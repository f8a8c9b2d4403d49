//! # Introduction
//!
//! A recognizer for MiniLang, a small imperative teaching language. Source
//! text is scanned one token at a time and checked by a recursive-descent
//! parser with a single token of lookahead. The first lexical, syntax or
//! structural problem stops the parse and is reported as a [`Diagnostic`]
//! carrying the line and column where it was found.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → accept / Diagnostic (→ syntax tree)
//! ```
//!
//! 1. [`parser::lexer`]: characters to [`parser::lexer::Token`]s, tracking
//!    line and column.
//! 2. [`parser`]: the grammar, one method per production, and the
//!    optional [`parser::ast::SyntaxNode`] tree.
//! 3. [`report`]: plain-text token tables and verdicts for the driver.
//! 4. [`ui`]: ratatui-based inspector; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use minilang::parser::{parse_source, ParserConfig};
//!
//! let result = parse_source("program demo : print 1 end", ParserConfig::recognizer());
//! assert!(result.is_ok());
//! ```
//!
//! [`Diagnostic`]: parser::Diagnostic

pub mod parser;
pub mod report;
pub mod ui;
