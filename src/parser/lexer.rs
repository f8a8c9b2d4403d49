//! Lexer (scanner) for MiniLang source code
//!
//! Converts raw source text into [`Token`]s, one per call to
//! [`Lexer::next_token`]. The parser pulls tokens on demand; `//` comments are
//! discarded here and never reach it.
//!
//! The scanner is fail-fast: the first illegal character (or out-of-range
//! integer literal) is recorded as a [`LexError`], reported once as an
//! [`TokenKind::Invalid`] token, and every later call yields
//! [`TokenKind::EndOfInput`].

use super::ast::SourceLocation;
use std::fmt;

/// Closed set of token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Program,
    End,
    Int,
    Bool,
    Print,
    If,
    Then,
    Else,
    While,
    Do,
    Od,
    Fi,
    True,
    False,
    Or,
    And,
    Not,

    // Identifiers and literals
    Identifier,
    Number,

    // Punctuation
    Semicolon, // ;
    Colon,     // :
    LParen,    // (
    RParen,    // )

    // Operators
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Assign,    // :=
    Equal,     // =
    NotEqual,  // !=
    Less,      // <
    LessEq,    // <=
    Greater,   // >
    GreaterEq, // >=

    // Special
    EndOfInput,
    Invalid,
}

impl TokenKind {
    /// Spelling used in diagnostics and token tables.
    pub fn spelling(self) -> &'static str {
        match self {
            TokenKind::Program => "program",
            TokenKind::End => "end",
            TokenKind::Int => "int",
            TokenKind::Bool => "bool",
            TokenKind::Print => "print",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Od => "od",
            TokenKind::Fi => "fi",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Or => "or",
            TokenKind::And => "and",
            TokenKind::Not => "not",
            TokenKind::Identifier => "ID",
            TokenKind::Number => "NUM",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Assign => ":=",
            TokenKind::Equal => "=",
            TokenKind::NotEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEq => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEq => ">=",
            TokenKind::EndOfInput => "end-of-text",
            TokenKind::Invalid => "invalid",
        }
    }

    pub fn is_keyword(self) -> bool {
        keyword(self.spelling()) == Some(self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Look up a complete word in the reserved keyword table.
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "program" => TokenKind::Program,
        "end" => TokenKind::End,
        "int" => TokenKind::Int,
        "bool" => TokenKind::Bool,
        "print" => TokenKind::Print,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "od" => TokenKind::Od,
        "fi" => TokenKind::Fi,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "or" => TokenKind::Or,
        "and" => TokenKind::And,
        "not" => TokenKind::Not,
        _ => return None,
    };
    Some(kind)
}

/// Payload carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Text(String),
    Integer(i64),
    Empty,
}

/// A single scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation, value: TokenValue) -> Self {
        Self {
            kind,
            location,
            value,
        }
    }

    fn bare(kind: TokenKind, location: SourceLocation) -> Self {
        Self::new(kind, location, TokenValue::Empty)
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// Identifier text, or the offending characters of an `Invalid` token.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Number of source columns the token spans.
    pub fn width(&self) -> usize {
        match (&self.kind, &self.value) {
            (_, TokenValue::Text(text)) => text.chars().count(),
            (_, TokenValue::Integer(n)) => n.to_string().len(),
            (TokenKind::EndOfInput, _) => 0,
            (kind, _) => kind.spelling().len(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, TokenValue::Text(name)) => write!(f, "identifier '{}'", name),
            (TokenKind::Number, TokenValue::Integer(n)) => write!(f, "number {}", n),
            (TokenKind::Invalid, TokenValue::Text(text)) => write!(f, "invalid '{}'", text),
            (TokenKind::EndOfInput, _) => write!(f, "end of input"),
            (kind, _) => write!(f, "'{}'", kind),
        }
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    IllegalCharacter(char),
    IntegerOverflow(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::IllegalCharacter(ch) => {
                write!(f, "Illegal Character Found: '{}' at {}", ch, self.location)
            }
            LexErrorKind::IntegerOverflow(digits) => write!(
                f,
                "Integer Literal Out Of Range: '{}' at {}",
                digits, self.location
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Lexer for MiniLang source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    error: Option<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            error: None,
        }
    }

    /// The lexical error that halted scanning, if any.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Scan the whole input, ending with the `EndOfInput` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::Invalid => {
                    if let Some(err) = self.error.clone() {
                        return Err(err);
                    }
                    tokens.push(token);
                }
                TokenKind::EndOfInput => {
                    tokens.push(token);
                    break;
                }
                _ => tokens.push(token),
            }
        }

        Ok(tokens)
    }

    /// Produce the next token.
    ///
    /// Total: at end of input (or after a lexical error) every call returns
    /// `EndOfInput` at the same location.
    pub fn next_token(&mut self) -> Token {
        if self.error.is_some() {
            return Token::bare(TokenKind::EndOfInput, self.current_location());
        }

        loop {
            self.skip_whitespace();

            let loc = self.current_location();
            let Some(ch) = self.advance() else {
                return Token::bare(TokenKind::EndOfInput, loc);
            };

            let kind = match ch {
                'a'..='z' | 'A'..='Z' => return self.identifier_or_keyword(ch, loc),
                '0'..='9' => return self.number_literal(ch, loc),

                '/' => {
                    if self.peek() == Some('/') {
                        self.skip_line_comment();
                        continue;
                    }
                    TokenKind::Slash
                }
                ':' => self.with_equals(TokenKind::Assign, TokenKind::Colon),
                '<' => self.with_equals(TokenKind::LessEq, TokenKind::Less),
                '>' => self.with_equals(TokenKind::GreaterEq, TokenKind::Greater),
                '!' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::NotEqual
                    } else {
                        return self.fail(LexErrorKind::IllegalCharacter('!'), loc, "!".into());
                    }
                }

                ';' => TokenKind::Semicolon,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '=' => TokenKind::Equal,

                _ => return self.fail(LexErrorKind::IllegalCharacter(ch), loc, ch.to_string()),
            };

            return Token::bare(kind, loc);
        }
    }

    /// Two-character operator if the next character is `=`, else the single one.
    fn with_equals(&mut self, combined: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            combined
        } else {
            single
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match keyword(&ident) {
            Some(kind) => Token::bare(kind, loc),
            None => Token::new(TokenKind::Identifier, loc, TokenValue::Text(ident)),
        }
    }

    /// Parse an unsigned decimal literal, rejecting values above `i64::MAX`
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);
        let mut value = Some(digit_value(first_digit));

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.advance();
            digits.push(ch);
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(digit_value(ch)));
        }

        match value {
            Some(n) => Token::new(TokenKind::Number, loc, TokenValue::Integer(n)),
            None => self.fail(LexErrorKind::IntegerOverflow(digits.clone()), loc, digits),
        }
    }

    /// Record a lexical error and return the `Invalid` token reporting it.
    fn fail(&mut self, kind: LexErrorKind, location: SourceLocation, text: String) -> Token {
        self.error = Some(LexError { kind, location });
        Token::new(TokenKind::Invalid, location, TokenValue::Text(text))
    }

    /// Skip spaces, tabs, carriage returns and newlines
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Skip a `//` comment up to, not including, the newline
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn digit_value(ch: char) -> i64 {
    (ch as u8 - b'0') as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_assignment_tokens() {
        let mut lexer = Lexer::new("x12_ := 3 + 4;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens.len(), 7);
        assert!(matches!(tokens[0].kind, TokenKind::Identifier));
        assert_eq!(tokens[0].text(), Some("x12_"));
        assert!(matches!(tokens[1].kind, TokenKind::Assign));
        assert_eq!(tokens[2].integer(), Some(3));
        assert!(matches!(tokens[3].kind, TokenKind::Plus));
        assert_eq!(tokens[4].integer(), Some(4));
        assert!(matches!(tokens[5].kind, TokenKind::Semicolon));
        assert!(matches!(tokens[6].kind, TokenKind::EndOfInput));

        let columns: Vec<usize> = tokens[..6].iter().map(|t| t.column()).collect();
        assert_eq!(columns, vec![1, 6, 9, 11, 13, 14]);
        assert!(tokens.iter().all(|t| t.line() == 1));
    }

    #[test]
    fn test_keywords_are_never_identifiers() {
        let words = [
            "program", "end", "int", "bool", "print", "if", "then", "else", "while", "do", "od",
            "fi", "true", "false", "or", "and", "not",
        ];
        for word in words {
            let mut lexer = Lexer::new(word);
            let token = lexer.next_token();
            assert_ne!(token.kind, TokenKind::Identifier, "{word} scanned as identifier");
            assert_eq!(token.kind.spelling(), word);
            assert!(token.kind.is_keyword());
        }
    }

    #[test]
    fn test_keyword_lookup_is_exact() {
        assert_eq!(
            kinds("If iff fi_ end1 End"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("a//c\nb");
        let a = lexer.next_token();
        let b = lexer.next_token();

        assert_eq!(a.text(), Some("a"));
        assert_eq!(b.text(), Some("b"));
        assert_eq!(a.line(), 1);
        assert_eq!(b.line(), 2);
        assert_eq!(b.column(), 1);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(kinds("x // trailing"), vec![TokenKind::Identifier, TokenKind::EndOfInput]);
        assert_eq!(kinds("a / b"), vec![TokenKind::Identifier, TokenKind::Slash, TokenKind::Identifier, TokenKind::EndOfInput]);
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(
            kinds(":= <= >= != : < > ="),
            vec![
                TokenKind::Assign,
                TokenKind::LessEq,
                TokenKind::GreaterEq,
                TokenKind::NotEqual,
                TokenKind::Colon,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Equal,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_lone_colon_leaves_next_character() {
        let mut lexer = Lexer::new(":x");
        let colon = lexer.next_token();
        let ident = lexer.next_token();

        assert_eq!(colon.kind, TokenKind::Colon);
        assert_eq!(colon.column(), 1);
        assert_eq!(ident.text(), Some("x"));
        assert_eq!(ident.column(), 2);
    }

    #[test]
    fn test_multi_character_token_column_is_first_character() {
        let mut lexer = Lexer::new("  <= program");
        assert_eq!(lexer.next_token().location, SourceLocation::new(1, 3));
        assert_eq!(lexer.next_token().location, SourceLocation::new(1, 6));
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut lexer = Lexer::new("x\n");
        lexer.next_token();
        let first = lexer.next_token();
        let second = lexer.next_token();
        let third = lexer.next_token();

        assert_eq!(first.kind, TokenKind::EndOfInput);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_illegal_character() {
        let mut lexer = Lexer::new("x := 1 # 2");
        let err = lexer.tokenize().unwrap_err();

        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('#'));
        assert_eq!(err.location, SourceLocation::new(1, 8));
        assert_eq!(err.to_string(), "Illegal Character Found: '#' at (Line: 1, Pos: 8)");
    }

    #[test]
    fn test_lone_bang_is_illegal_and_halts() {
        let mut lexer = Lexer::new("a ! b");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);

        let bad = lexer.next_token();
        assert_eq!(bad.kind, TokenKind::Invalid);
        assert_eq!(bad.column(), 3);
        assert_eq!(
            lexer.error().map(|e| &e.kind),
            Some(&LexErrorKind::IllegalCharacter('!'))
        );

        // `b` is never produced once scanning has failed
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_underscore_cannot_start_identifier() {
        let mut lexer = Lexer::new("_x");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('_'));
    }

    #[test]
    fn test_integer_literal_limits() {
        let mut lexer = Lexer::new("9223372036854775807");
        assert_eq!(lexer.next_token().integer(), Some(i64::MAX));

        let mut lexer = Lexer::new("9223372036854775808");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert_eq!(
            lexer.error().map(|e| &e.kind),
            Some(&LexErrorKind::IntegerOverflow("9223372036854775808".to_string()))
        );
    }

    #[test]
    fn test_line_tracking() {
        let mut lexer = Lexer::new("program\n\n  p :\n\tend");
        let tokens = lexer.tokenize().unwrap();
        let locations: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.line(), t.column())).collect();

        assert_eq!(locations, vec![(1, 1), (3, 3), (3, 5), (4, 2), (4, 5)]);
    }
}
