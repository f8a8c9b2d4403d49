//! Plain-text reports printed by the command line driver

use crate::parser::lexer::{Token, TokenValue};
use crate::parser::Diagnostic;

const RULE: &str = "=======================================================";
const DIVIDER: &str = "-------------------------------------------------------";

/// Token table with one row per token: position, kind and value.
pub fn token_table(tokens: &[Token]) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:^54}\n{}\n", "TOKENS", RULE));
    out.push_str(&format!("{:^17}{:^20}{:^14}\n{}\n", "Position", "Kind", "Value", RULE));

    for token in tokens {
        let row = format!(
            "{:<24} {:<15} {}",
            token.location.to_string(),
            token.kind.spelling(),
            value_text(token)
        );
        out.push_str(row.trim_end());
        out.push('\n');
        out.push_str(DIVIDER);
        out.push('\n');
    }

    out
}

fn value_text(token: &Token) -> String {
    match &token.value {
        TokenValue::Text(text) => text.clone(),
        TokenValue::Integer(n) => n.to_string(),
        TokenValue::Empty => token.kind.spelling().to_string(),
    }
}

/// `True`, or `False` followed by the diagnostic on its own line.
pub fn verdict(outcome: Result<(), &Diagnostic>) -> String {
    match outcome {
        Ok(()) => "True".to_string(),
        Err(diagnostic) => format!("False\n{}", diagnostic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;
    use crate::parser::parse_source;
    use crate::parser::ParserConfig;

    #[test]
    fn test_token_table_rows() {
        let tokens = Lexer::new("x := 42").tokenize().unwrap();
        let table = token_table(&tokens);
        let rows: Vec<&str> = table
            .lines()
            .filter(|l| l.starts_with("(Line"))
            .collect();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains("ID") && rows[0].ends_with("x"));
        assert!(rows[1].contains(":="));
        assert!(rows[2].contains("NUM") && rows[2].contains("42"));
        assert!(rows[3].contains("end-of-text"));
    }

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(Ok(())), "True");

        let err = parse_source("program p : end", ParserConfig::recognizer()).unwrap_err();
        let text = verdict(Err(&err));
        assert!(text.starts_with("False\nAt (Line: 1, Pos: 13)"));
    }
}
