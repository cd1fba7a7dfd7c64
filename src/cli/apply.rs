use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use clap::Args;

use shadecast::snippet::join_text;
use shadecast::{Converter, Snippet, Span, StructTy};

use super::{load_options, parse_operand, parse_ty, parse_types, report};

#[derive(Args)]
pub struct ApplyArgs {
    /// Operands written `text:type` (`a:i32`, `v:ptr<f32>`) or bare literals
    #[arg(required = true)]
    pub operands: Vec<String>,
    /// Allowed target type (repeatable)
    #[arg(long, value_name = "TYPE")]
    pub restrict: Vec<String>,
}

#[derive(Args)]
pub struct StructArgs {
    /// Struct name
    pub name: String,
    /// Declared field `name:type`, in declaration order (repeatable)
    #[arg(long = "field", value_name = "NAME:TYPE", required = true)]
    pub fields: Vec<String>,
    /// Literal value `name=text:type` or `name=literal` (repeatable)
    #[arg(long = "value", value_name = "NAME=OPERAND")]
    pub values: Vec<String>,
}

pub fn cmd_apply(args: ApplyArgs, config: Option<&Path>) {
    let snippets: Vec<Snippet> = args.operands.iter().map(|arg| parse_operand(arg)).collect();
    let restrict = parse_types(&args.restrict);
    let restrict_to = (!restrict.is_empty()).then_some(restrict.as_slice());

    let source = args.operands.join(" ");
    let span = Span::covering(&source);
    let mut converter = Converter::with_options(load_options(config));
    match converter.apply_common(&snippets, restrict_to, span) {
        Ok(converted) => {
            report(converter.diagnostics(), &source);
            if let Some(first) = converted.first() {
                println!("{}: {}", join_text(&converted), first.ty);
            }
            if converter.has_errors() {
                process::exit(1);
            }
        }
        Err(e) => {
            report(&[e.to_diagnostic(span)], &source);
            process::exit(1);
        }
    }
}

pub fn cmd_struct(args: StructArgs, config: Option<&Path>) {
    let fields = args
        .fields
        .iter()
        .map(|field| match field.split_once(':') {
            Some((name, ty)) => (name.trim().to_string(), parse_ty(ty)),
            None => {
                eprintln!("error: field '{}' must be written name:type", field);
                process::exit(1);
            }
        })
        .collect();
    let Some(struct_ty) = StructTy::new(args.name.as_str(), fields) else {
        eprintln!("error: struct '{}' declares a field twice", args.name);
        process::exit(1);
    };

    let mut values = BTreeMap::new();
    for value in &args.values {
        let Some((name, operand)) = value.split_once('=') else {
            eprintln!("error: value '{}' must be written name=operand", value);
            process::exit(1);
        };
        if values
            .insert(name.trim().to_string(), parse_operand(operand))
            .is_some()
        {
            eprintln!("error: field '{}' given more than once", name.trim());
            process::exit(1);
        }
    }

    let source = args.values.join(" ");
    let span = Span::covering(&source);
    let mut converter = Converter::with_options(load_options(config));
    match converter.apply_to_struct(&struct_ty, &values, span) {
        Ok(converted) => {
            report(converter.diagnostics(), &source);
            println!("{}({})", struct_ty.name, join_text(&converted));
            if converter.has_errors() {
                process::exit(1);
            }
        }
        Err(e) => {
            report(&[e.to_diagnostic(span)], &source);
            process::exit(1);
        }
    }
}
