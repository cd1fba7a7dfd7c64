use std::path::Path;
use std::process;

use clap::Args;

use shadecast::{Converter, HostValue, Span};

use super::{load_options, report};

#[derive(Args)]
pub struct CoerceArgs {
    /// Host value, e.g. `3`, `[1, 2.5]`, `[a:u32, 2]`, `"text"`
    pub value: String,
}

pub fn cmd_coerce(args: CoerceArgs, config: Option<&Path>) {
    let value: HostValue = match args.value.parse() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    let span = Span::covering(&args.value);
    let mut converter = Converter::with_options(load_options(config));
    let snippet = converter.coerce(&value, span);
    report(converter.diagnostics(), &args.value);
    println!("{}", snippet);
    if snippet.is_unknown() || converter.has_errors() {
        process::exit(1);
    }
}
