use super::*;
use crate::types::{Scalar, StructTy};

use ConversionAction::{Cast, Deref, Identity, Ref};

fn vec2f() -> Ty {
    Ty::vec(2, Scalar::F32)
}

#[test]
fn test_single_identity() {
    assert_eq!(resolve_single(&Ty::F32, &Ty::F32, true), Some(Identity));
    assert_eq!(resolve_single(&vec2f(), &vec2f(), false), Some(Identity));
}

#[test]
fn test_single_abstract_binding_is_free() {
    assert_eq!(resolve_single(&Ty::AbstractInt, &Ty::U32, false), Some(Identity));
    assert_eq!(resolve_single(&Ty::AbstractFloat, &Ty::F16, false), Some(Identity));
    assert_eq!(resolve_single(&Ty::AbstractFloat, &Ty::I32, true), None);
    assert_eq!(resolve_single(&Ty::AbstractInt, &Ty::BOOL, true), None);
}

#[test]
fn test_single_deref_and_ref() {
    let ptr = Ty::ptr(Ty::F32);
    assert_eq!(resolve_single(&ptr, &Ty::F32, true), Some(Deref));
    assert_eq!(resolve_single(&Ty::F32, &ptr, true), Some(Ref));
    assert_eq!(resolve_single(&ptr, &ptr, true), Some(Identity));
    assert_eq!(resolve_single(&ptr, &Ty::F16, true), None);
}

#[test]
fn test_single_cast_needs_permission() {
    assert_eq!(resolve_single(&Ty::I32, &Ty::F32, true), Some(Cast(Ty::F32)));
    assert_eq!(resolve_single(&Ty::I32, &Ty::F32, false), None);
    assert_eq!(resolve_single(&Ty::BOOL, &Ty::F32, true), None);
    assert_eq!(resolve_single(&Ty::F32, &Ty::BOOL, true), None);
    assert_eq!(resolve_single(&vec2f(), &Ty::vec(2, Scalar::F16), true), None);
}

#[test]
fn test_single_unknown_never_converts() {
    assert_eq!(resolve_single(&Ty::Unknown, &Ty::Unknown, true), None);
    assert_eq!(resolve_single(&Ty::Unknown, &Ty::F32, true), None);
    assert_eq!(resolve_single(&Ty::F32, &Ty::Unknown, true), None);
}

#[test]
fn test_deref_then_cast_is_not_discovered() {
    assert_eq!(resolve_single(&Ty::ptr(Ty::I32), &Ty::F32, true), None);
    assert!(resolve_common(&[Ty::ptr(Ty::I32), Ty::F32], None).is_none());
}

#[test]
fn test_cost_directions() {
    assert_eq!(conversion_cost(&Ty::U32, &Ty::F16), Some(CAST_TOWARD_PREFERRED));
    assert_eq!(conversion_cost(&Ty::F16, &Ty::U32), Some(CAST_AWAY));
    assert_eq!(conversion_cost(&Ty::AbstractInt, &Ty::U32), Some(0));
    assert_eq!(conversion_cost(&Ty::ptr(Ty::I32), &Ty::I32), Some(0));
    assert_eq!(conversion_cost(&Ty::F32, &vec2f()), None);
}

#[test]
fn test_identity_for_every_concrete_type() {
    let tys = [
        Ty::F32,
        Ty::F16,
        Ty::I32,
        Ty::U32,
        Ty::BOOL,
        vec2f(),
        Ty::mat(3, 3, Scalar::F32),
        Ty::ptr(Ty::U32),
        Ty::array(Ty::F32, Some(4)),
        Ty::Struct(StructTy::new("P", vec![("x".into(), Ty::F32)]).unwrap()),
    ];
    for ty in tys {
        let plan = resolve_common(&[ty.clone(), ty.clone()], None).unwrap();
        assert_eq!(plan.target, ty);
        assert_eq!(plan.actions, vec![Identity, Identity]);
        assert!(!plan.has_implicit_casts);
    }
}

#[test]
fn test_abstract_absorbed_by_concrete() {
    for scalar in Scalar::NUMERIC {
        let ty = Ty::scalar(scalar);
        let plan = resolve_common(&[Ty::AbstractInt, ty.clone()], None).unwrap();
        assert_eq!(plan.target, ty);
        assert_eq!(plan.actions, vec![Identity, Identity]);
        assert!(!plan.has_implicit_casts);
    }
    let plan = resolve_common(&[Ty::F16, Ty::AbstractFloat], None).unwrap();
    assert_eq!(plan.target, Ty::F16);
    assert!(!plan.has_implicit_casts);
}

#[test]
fn test_rank_monotonicity() {
    let plan = resolve_common(&[Ty::U32, Ty::F16, Ty::I32], None).unwrap();
    assert_eq!(plan.target, Ty::F16);
    assert_eq!(plan.actions, vec![Cast(Ty::F16), Identity, Cast(Ty::F16)]);
    assert!(plan.has_implicit_casts);

    let sources = [Ty::U32, Ty::F16, Ty::I32];
    let costs: Vec<u32> = [Ty::F16, Ty::I32, Ty::U32]
        .iter()
        .map(|target| total_cost(&sources, target).unwrap())
        .collect();
    assert_eq!(costs, vec![20, 30, 40]);
}

#[test]
fn test_cheaper_direction_wins() {
    // i32 -> f32 costs 10, f32 -> i32 costs 20.
    let plan = resolve_common(&[Ty::I32, Ty::F32], None).unwrap();
    assert_eq!(plan.target, Ty::F32);
    let plan = resolve_common(&[Ty::U32, Ty::I32], None).unwrap();
    assert_eq!(plan.target, Ty::I32);
    assert_eq!(plan.actions, vec![Cast(Ty::I32), Identity]);
}

#[test]
fn test_tie_goes_to_lower_rank() {
    let plan = resolve_common(&[Ty::AbstractInt], Some(&[Ty::U32, Ty::F16, Ty::F32])).unwrap();
    assert_eq!(plan.target, Ty::F32);
    assert!(!plan.has_implicit_casts);
}

#[test]
fn test_restriction_enforced() {
    let plan = resolve_common(&[Ty::AbstractInt, Ty::I32], Some(&[Ty::F32])).unwrap();
    assert_eq!(plan.target, Ty::F32);
    assert_eq!(plan.actions, vec![Identity, Cast(Ty::F32)]);
    assert!(plan.has_implicit_casts);
}

#[test]
fn test_restriction_picks_cheapest_allowed() {
    let plan = resolve_common(&[Ty::U32, Ty::U32], Some(&[Ty::I32, Ty::F16])).unwrap();
    assert_eq!(plan.target, Ty::F16);
    assert!(resolve_common(&[Ty::F32], Some(&[vec2f()])).is_none());
    assert!(resolve_common(&[Ty::F32], Some(&[])).is_none());
}

#[test]
fn test_shape_mismatch_fails() {
    assert!(resolve_common(&[Ty::F32, vec2f()], None).is_none());
    let s = Ty::Struct(StructTy::new("P", vec![("x".into(), Ty::F32)]).unwrap());
    assert!(resolve_common(&[s, Ty::F32], None).is_none());
}

#[test]
fn test_empty_and_unknown_inputs_fail() {
    assert!(resolve_common(&[], None).is_none());
    assert!(resolve_common(&[Ty::F32, Ty::Unknown], None).is_none());
    assert!(resolve_common(&[Ty::Unknown], Some(&[Ty::F32])).is_none());
}

#[test]
fn test_pointer_and_value_prefer_value() {
    let plan = resolve_common(&[Ty::ptr(Ty::F32), Ty::F32], None).unwrap();
    assert_eq!(plan.target, Ty::F32);
    assert_eq!(plan.actions, vec![Deref, Identity]);
    assert!(!plan.has_implicit_casts);

    let plan = resolve_common(&[Ty::F32], Some(&[Ty::ptr(Ty::F32)])).unwrap();
    assert_eq!(plan.actions, vec![Ref]);
}

#[test]
fn test_all_abstract_stays_abstract() {
    let plan = resolve_common(&[Ty::AbstractInt, Ty::AbstractInt], None).unwrap();
    assert_eq!(plan.target, Ty::AbstractInt);
    let plan = resolve_common(&[Ty::AbstractInt, Ty::AbstractFloat], None).unwrap();
    assert_eq!(plan.target, Ty::AbstractFloat);
    assert_eq!(plan.actions, vec![Identity, Identity]);
}

#[test]
fn test_concretize_binds_literals() {
    let options = ResolveOptions {
        restrict_to: None,
        concretize: true,
    };
    let plan =
        resolve_common_with(&[Ty::AbstractInt, Ty::AbstractFloat, Ty::AbstractInt], options)
            .unwrap();
    assert_eq!(plan.target, Ty::F32);
    assert!(!plan.has_implicit_casts);

    let plan = resolve_common_with(&[Ty::AbstractInt, Ty::AbstractInt], options).unwrap();
    assert_eq!(plan.target, Ty::I32);

    let plan = resolve_common_with(&[Ty::AbstractInt, Ty::F16], options).unwrap();
    assert_eq!(plan.target, Ty::F16);
}

#[test]
fn test_actions_one_per_input() {
    let sources = [Ty::AbstractInt, Ty::I32, Ty::U32, Ty::ptr(Ty::I32)];
    let plan = resolve_common(&sources, None).unwrap();
    assert_eq!(plan.actions.len(), sources.len());
    assert_eq!(plan.target, Ty::I32);
    assert_eq!(plan.actions[3], Deref);
    assert_eq!(
        plan.has_implicit_casts,
        plan.actions.iter().any(ConversionAction::is_cast)
    );
}
