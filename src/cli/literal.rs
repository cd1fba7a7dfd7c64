use std::process;

use clap::Args;

use shadecast::classify_literal;

#[derive(Args)]
pub struct LiteralArgs {
    /// Literal token, e.g. `1.5h`, `0x1F`, `7u`
    pub text: String,
}

pub fn cmd_literal(args: LiteralArgs) {
    match classify_literal(&args.text) {
        Some(snippet) => println!("{}", snippet),
        None => {
            eprintln!("error: '{}' is not a numeric literal", args.text);
            process::exit(1);
        }
    }
}
