use std::path::PathBuf;
use std::process;

use clap::Args;
use serde_json::json;

use shadecast::types::display_list;
use shadecast::{parse_batch, resolve_batch};

use super::print_json;

#[derive(Args)]
pub struct BatchArgs {
    /// File with one comma-separated operand list per line
    pub input: PathBuf,
    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_batch(args: BatchArgs) {
    let content = match std::fs::read_to_string(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };
    let lines = match parse_batch(&content) {
        Ok(lines) => lines,
        Err(diag) => {
            let filename = args.input.display().to_string();
            if let Err(e) = diag.render(&filename, &content) {
                eprintln!("error: {}", e);
            }
            process::exit(1);
        }
    };

    let plans = resolve_batch(&lines);
    let failed = plans.iter().filter(|plan| plan.is_none()).count();

    if args.json {
        let results: Vec<_> = lines
            .iter()
            .zip(&plans)
            .map(|(line, plan)| json!({ "line": line.line, "sources": line.sources, "plan": plan }))
            .collect();
        print_json(&json!(results));
    } else {
        for (line, plan) in lines.iter().zip(&plans) {
            let sources = display_list(&line.sources);
            match plan {
                Some(plan) if plan.has_implicit_casts => {
                    println!("{:>4}: [{}] -> {} (casts)", line.line, sources, plan.target)
                }
                Some(plan) => println!("{:>4}: [{}] -> {}", line.line, sources, plan.target),
                None => println!("{:>4}: [{}] -> incompatible", line.line, sources),
            }
        }
        eprintln!("{} resolved, {} incompatible", plans.len() - failed, failed);
    }
}
