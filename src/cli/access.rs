use std::process;

use clap::Args;

use shadecast::{index_access, property_access};

use super::parse_ty;

#[derive(Args)]
pub struct AccessArgs {
    /// Parent type, e.g. `vec4f` or `array<i32, 8>`
    pub parent: String,
    /// Member name or swizzle mask; a number or `[]` indexes instead
    pub member: String,
}

pub fn cmd_access(args: AccessArgs) {
    let parent = parse_ty(&args.parent);
    let member = args.member.trim();
    let is_index =
        member == "[]" || (!member.is_empty() && member.chars().all(|c| c.is_ascii_digit()));
    let ty = if is_index {
        index_access(&parent)
    } else {
        property_access(&parent, member)
    };
    if ty.is_unknown() {
        eprintln!("error: {} has no member '{}'", parent, member);
        process::exit(1);
    }
    println!("{}", ty);
}
