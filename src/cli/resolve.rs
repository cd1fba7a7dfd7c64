use std::process;

use clap::Args;
use serde_json::json;

use shadecast::{resolve_common_with, ConversionAction, ConversionError, ResolveOptions};

use super::{parse_types, print_json};

#[derive(Args)]
pub struct ResolveArgs {
    /// Operand types, e.g. `i32 f16 abstract-int`
    #[arg(required = true)]
    pub types: Vec<String>,
    /// Allowed target type (repeatable)
    #[arg(long, value_name = "TYPE")]
    pub restrict: Vec<String>,
    /// Never resolve to an abstract type
    #[arg(long)]
    pub concretize: bool,
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_resolve(args: ResolveArgs) {
    let sources = parse_types(&args.types);
    let restrict = parse_types(&args.restrict);
    let restrict_to = (!restrict.is_empty()).then_some(restrict.as_slice());

    let options = ResolveOptions {
        restrict_to,
        concretize: args.concretize,
    };
    let Some(plan) = resolve_common_with(&sources, options) else {
        let target = match restrict_to {
            Some([single]) => Some(single.clone()),
            _ => None,
        };
        let err = ConversionError::IncompatibleTypes { sources, target };
        eprintln!("error: {}", err);
        process::exit(1);
    };

    if args.json {
        print_json(&json!({ "sources": sources, "plan": plan }));
        return;
    }

    println!("target: {}", plan.target);
    for (source, action) in sources.iter().zip(&plan.actions) {
        println!("  {:<16} {}", source.to_string(), describe(action));
    }
    if plan.has_implicit_casts {
        println!("implicit casts: yes");
    }
}

fn describe(action: &ConversionAction) -> String {
    match action {
        ConversionAction::Identity => "identity".to_string(),
        ConversionAction::Cast(ty) => format!("cast to {}", ty),
        ConversionAction::Deref => "dereference".to_string(),
        ConversionAction::Ref => "take reference".to_string(),
    }
}
