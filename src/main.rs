use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod cli;

#[derive(Parser)]
#[command(
    name = "shadecast",
    version,
    about = "Shader type resolution and implicit conversion"
)]
struct Cli {
    /// Config file (default: nearest shadecast.toml above the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log resolver decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the common type of a list of operand types
    Resolve(cli::resolve::ResolveArgs),
    /// Convert typed operands to a common type and print the rendered text
    Apply(cli::apply::ApplyArgs),
    /// Convert struct literal values to the declared field types
    Struct(cli::apply::StructArgs),
    /// Classify a literal token
    Literal(cli::literal::LiteralArgs),
    /// Type of a member or index access
    Access(cli::access::AccessArgs),
    /// Give a host value a shader type
    Coerce(cli::coerce::CoerceArgs),
    /// Resolve every operand list in a batch file
    Batch(cli::batch::BatchArgs),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Command::Resolve(args) => cli::resolve::cmd_resolve(args),
        Command::Apply(args) => cli::apply::cmd_apply(args, config),
        Command::Struct(args) => cli::apply::cmd_struct(args, config),
        Command::Literal(args) => cli::literal::cmd_literal(args),
        Command::Access(args) => cli::access::cmd_access(args),
        Command::Coerce(args) => cli::coerce::cmd_coerce(args, config),
        Command::Batch(args) => cli::batch::cmd_batch(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
