// MiniLang: recognizer and syntax inspector

use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minilang::parser::lexer::{Lexer, TokenKind};
use minilang::parser::{parse_source, Diagnostic, ParserConfig};
use minilang::report;
use minilang::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Check,
    Tokens,
    Tree,
    Inspect,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [--tokens | --tree | --inspect] <file>", program_name);
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  (default)   check the program and print True or False");
    eprintln!("  --tokens    print the token table");
    eprintln!("  --tree      print the syntax tree of an accepted program");
    eprintln!("  --inspect   browse source, tokens and tree in the terminal");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/gcd.ml", program_name);
    eprintln!("  {} --inspect demos/missing_separator.ml", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minilang");

    let mut mode = Mode::Check;
    let mut file = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tokens" => mode = Mode::Tokens,
            "--tree" => mode = Mode::Tree,
            "--inspect" => mode = Mode::Inspect,
            "-h" | "--help" => {
                usage(program_name);
                return Ok(());
            }
            flag if flag.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", flag);
                usage(program_name);
                process::exit(1);
            }
            path => file = Some(path),
        }
    }

    let Some(file) = file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        usage(program_name);
        process::exit(1);
    };

    if !Path::new(file).exists() {
        eprintln!("Error: File '{}' not found", file);
        process::exit(1);
    }

    let source = fs::read_to_string(file)?;

    let accepted = match mode {
        Mode::Check => check(file, &source),
        Mode::Tokens => print_tokens(&source),
        Mode::Tree => print_tree(file, &source),
        Mode::Inspect => {
            inspect(source)?;
            true
        }
    };

    if !accepted {
        process::exit(1);
    }

    Ok(())
}

/// Recognize the program and print the verdict.
fn check(file: &str, source: &str) -> bool {
    eprintln!("Parsing {}...", file);
    let start = Instant::now();

    let result = parse_source(source, ParserConfig::recognizer()).map(|_| ());
    println!("{}", report::verdict(result.as_ref().map(|_| ())));

    eprintln!(
        "--- Program finished in {:.6} seconds ---",
        start.elapsed().as_secs_f64()
    );
    result.is_ok()
}

/// Print the token table; a lexical error ends it with the diagnostic.
fn print_tokens(source: &str) -> bool {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::EndOfInput => {
                tokens.push(token);
                break;
            }
            TokenKind::Invalid => break,
            _ => tokens.push(token),
        }
    }

    print!("{}", report::token_table(&tokens));

    match lexer.error() {
        Some(err) => {
            println!("{}", Diagnostic::from(err.clone()));
            false
        }
        None => true,
    }
}

/// Parse with tree building and print the outline.
fn print_tree(file: &str, source: &str) -> bool {
    eprintln!("Parsing {}...", file);

    match parse_source(source, ParserConfig::default()) {
        Ok(Some(tree)) => {
            print!("{}", tree);
            true
        }
        Ok(None) => true,
        Err(diagnostic) => {
            println!("{}", report::verdict(Err(&diagnostic)));
            false
        }
    }
}

fn inspect(source: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(source);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
