pub mod access;
pub mod apply;
pub mod batch;
pub mod coerce;
pub mod literal;
pub mod resolve;

use std::path::Path;
use std::process;

use shadecast::{classify_literal, render_diagnostics, ConversionOptions, Diagnostic, Snippet, Ty};

/// Name diagnostics are rendered under when they refer to command-line text.
pub const ARGS_NAME: &str = "<args>";

/// Options from `--config`, else the nearest `shadecast.toml`, else defaults.
pub fn load_options(config: Option<&Path>) -> ConversionOptions {
    let loaded = match config {
        Some(path) => ConversionOptions::load(path),
        None => match std::env::current_dir() {
            Ok(dir) => ConversionOptions::discover(&dir),
            Err(_) => Ok(ConversionOptions::default()),
        },
    };
    match loaded {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e.message);
            process::exit(1);
        }
    }
}

pub fn parse_ty(name: &str) -> Ty {
    match name.parse() {
        Ok(ty) => ty,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

pub fn parse_types(names: &[String]) -> Vec<Ty> {
    names.iter().map(|name| parse_ty(name)).collect()
}

/// An operand written `text:type`, or a bare literal such as `2.5` or `7u`.
pub fn parse_operand(arg: &str) -> Snippet {
    if let Some((text, ty)) = arg.rsplit_once(':') {
        if !text.is_empty() {
            return Snippet::new(text, parse_ty(ty));
        }
    }
    match classify_literal(arg) {
        Some(snippet) => snippet,
        None => {
            eprintln!(
                "error: '{}' is neither a literal nor an operand written text:type",
                arg
            );
            process::exit(1);
        }
    }
}

/// Render diagnostics against the command-line text they were reported on.
pub fn report(diagnostics: &[Diagnostic], source: &str) {
    if let Err(e) = render_diagnostics(diagnostics, ARGS_NAME, source) {
        eprintln!("error: cannot render diagnostics: {}", e);
    }
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: cannot serialize output: {}", e);
            process::exit(1);
        }
    }
}
