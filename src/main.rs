//! creole-html CLI - Creole wiki markup to HTML fragments
//!
//! Usage: `creole-html [--xhtml] [FILE | -]`

use std::io::{self, BufRead, Write};

use creole_html::{Options, Parser, source};

fn main() -> io::Result<()> {
    let mut options = Options::default();
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--xhtml" => options = Options::xhtml(),
            "-" => path = None,
            _ => path = Some(arg),
        }
    }

    let parser = Parser::with_options(options);

    // Simple usage: read from stdin or file
    let result = match path {
        Some(path) => parser.parse(std::fs::read_to_string(path)?),
        None => {
            let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
            parser.parse(source::lines(lines))
        }
    };

    io::stdout().write_all(result.html().as_bytes())?;

    Ok(())
}
