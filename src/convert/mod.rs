//! Conversion resolution: picking a common type for a set of operands and
//! the single action that brings each operand to it.
//!
//! Each candidate target is scored by summing per-operand costs. Binding an
//! abstract literal, taking a reference and dereferencing are free. A cast
//! toward a lower-ranked (more preferred) scalar costs
//! [`CAST_TOWARD_PREFERRED`], any other cast costs [`CAST_AWAY`]. A
//! candidate that some operand cannot reach is discarded. The cheapest
//! candidate wins; ties go to the lower rank.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::types::Ty;

pub const CAST_TOWARD_PREFERRED: u32 = 10;
pub const CAST_AWAY: u32 = 20;

/// How one operand reaches the common type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum ConversionAction {
    Identity,
    Cast(Ty),
    Deref,
    Ref,
}

impl ConversionAction {
    pub fn is_cast(&self) -> bool {
        matches!(self, ConversionAction::Cast(_))
    }
}

/// The resolved target plus one action per operand, in operand order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPlan {
    pub target: Ty,
    pub actions: Vec<ConversionAction>,
    pub has_implicit_casts: bool,
}

impl ConversionPlan {
    fn new(target: Ty, actions: Vec<ConversionAction>) -> Self {
        let has_implicit_casts = actions.iter().any(ConversionAction::is_cast);
        Self {
            target,
            actions,
            has_implicit_casts,
        }
    }
}

/// Knobs for [`resolve_common_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions<'a> {
    /// The target must be one of these types.
    pub restrict_to: Option<&'a [Ty]>,
    /// Never leave the result abstract: the default concrete type of each
    /// abstract operand is also a candidate, and all-abstract operand lists
    /// do not unify to an abstract type.
    pub concretize: bool,
}

/// The action converting `source` to `target`, if there is one.
///
/// Rules, first match wins: identical types, free abstract binding,
/// dereference, reference, then a numeric scalar cast when `allow_cast`.
pub fn resolve_single(source: &Ty, target: &Ty, allow_cast: bool) -> Option<ConversionAction> {
    if source.matches(target) || source.absorbs_into(target) {
        return Some(ConversionAction::Identity);
    }
    if source.referent().is_some_and(|r| r.matches(target)) {
        return Some(ConversionAction::Deref);
    }
    if target.referent().is_some_and(|r| source.matches(r)) {
        return Some(ConversionAction::Ref);
    }
    if allow_cast && source.is_concrete_numeric() && target.is_concrete_numeric() {
        return Some(ConversionAction::Cast(target.clone()));
    }
    None
}

/// Cost of converting `source` to `target`; `None` if it cannot be done.
pub fn conversion_cost(source: &Ty, target: &Ty) -> Option<u32> {
    match resolve_single(source, target, true)? {
        ConversionAction::Identity | ConversionAction::Deref | ConversionAction::Ref => Some(0),
        ConversionAction::Cast(_) => {
            if target.rank()? < source.rank()? {
                Some(CAST_TOWARD_PREFERRED)
            } else {
                Some(CAST_AWAY)
            }
        }
    }
}

/// Resolve a common type for `sources`, optionally restricted to a set of
/// allowed targets. Abstract results are allowed.
pub fn resolve_common(sources: &[Ty], restrict_to: Option<&[Ty]>) -> Option<ConversionPlan> {
    resolve_common_with(
        sources,
        ResolveOptions {
            restrict_to,
            concretize: false,
        },
    )
}

pub fn resolve_common_with(sources: &[Ty], options: ResolveOptions<'_>) -> Option<ConversionPlan> {
    if sources.is_empty() || sources.iter().any(Ty::is_unknown) {
        return None;
    }

    let candidates = candidate_targets(sources, &options);
    let (index, cost, target) = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let cost = total_cost(sources, candidate);
            trace!(candidate = %candidate, ?cost, "scored conversion candidate");
            cost.map(|cost| (index, cost, candidate))
        })
        .min_by_key(|&(index, cost, candidate)| {
            (
                cost,
                candidate.rank().unwrap_or(u8::MAX),
                candidate.is_pointer(),
                index,
            )
        })?;

    let actions = sources
        .iter()
        .map(|source| resolve_single(source, target, true))
        .collect::<Option<Vec<_>>>()?;
    let plan = ConversionPlan::new(target.clone(), actions);
    debug!(
        target = %plan.target,
        cost,
        candidate = index,
        casts = plan.has_implicit_casts,
        "resolved common type"
    );
    Some(plan)
}

fn total_cost(sources: &[Ty], target: &Ty) -> Option<u32> {
    sources
        .iter()
        .map(|source| conversion_cost(source, target))
        .sum()
}

fn push_unique(list: &mut Vec<Ty>, ty: Ty) {
    if !list.contains(&ty) {
        list.push(ty);
    }
}

/// Candidates in first-appearance order.
fn candidate_targets(sources: &[Ty], options: &ResolveOptions<'_>) -> Vec<Ty> {
    let mut candidates = Vec::new();
    if let Some(allowed) = options.restrict_to {
        for ty in allowed.iter().filter(|ty| !ty.is_unknown()) {
            push_unique(&mut candidates, ty.clone());
        }
        return candidates;
    }

    for ty in sources.iter().filter(|ty| ty.is_concrete()) {
        push_unique(&mut candidates, ty.clone());
    }
    if options.concretize {
        for ty in sources.iter().filter(|ty| ty.is_abstract()) {
            push_unique(&mut candidates, ty.concretize());
        }
    } else if candidates.is_empty() {
        // Every operand is abstract: unify among the literal types.
        let widest = if sources.contains(&Ty::AbstractFloat) {
            Ty::AbstractFloat
        } else {
            Ty::AbstractInt
        };
        candidates.push(widest);
    }
    candidates
}
