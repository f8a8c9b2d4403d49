//! MiniLang front end
//!
//! This module recognizes MiniLang source text and, optionally, builds a
//! syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens, pulled one at a time)
//! - [`parse`]: Parser struct, diagnostics and entry points
//! - [`ast`]: Source locations and syntax tree nodes
//!
//! # Language
//!
//! A program is `program NAME : BODY end`. A body is optional `int`/`bool`
//! declarations followed by `;`-separated statements: assignment (`:=`),
//! `if .. then .. [else ..] fi`, `while .. do .. od` and `print`.
//! Expressions cover integer and boolean operands with relational, additive
//! (`+ - or`) and multiplicative (`* / and`) operators. `//` starts a comment.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead and no
//! backtracking. The first error ends the parse.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{parse_source, Diagnostic, DiagnosticKind, Parser, ParserConfig};
