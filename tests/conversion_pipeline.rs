use std::collections::BTreeMap;

use shadecast::snippet::join_text;
use shadecast::{
    classify_literal, index_access, property_access, parse_batch, resolve_batch, resolve_common,
    ConversionAction, ConversionError, ConversionOptions, Converter, HostValue, ImplicitCastPolicy,
    Scalar, Severity, Snippet, Span, StructTy, Ty,
};

fn operand(text: &str, ty: &str) -> Snippet {
    Snippet::new(text, ty.parse().unwrap())
}

fn host(text: &str) -> HostValue {
    text.parse().unwrap()
}

// ── literals flowing into a binary expression ──

#[test]
fn test_literal_binds_to_typed_operand_without_warning() {
    let lit = classify_literal("2.5").unwrap();
    let mut converter = Converter::new();
    let out = converter
        .apply_common(&[operand("x", "f16"), lit], None, Span::dummy())
        .unwrap();
    assert_eq!(join_text(&out), "x, 2.5");
    assert!(out.iter().all(|s| s.ty == Ty::F16));
    assert!(converter.diagnostics().is_empty());
}

#[test]
fn test_hex_literal_is_normalized_before_binding() {
    let lit = classify_literal("0xffu").unwrap();
    let out = Converter::new()
        .apply_common(&[lit, operand("n", "u32")], None, Span::dummy())
        .unwrap();
    assert_eq!(join_text(&out), "255, n");
}

#[test]
fn test_mixed_precision_expression() {
    let operands = [operand("a", "u32"), operand("b", "f16"), operand("c", "i32")];
    let mut converter = Converter::new();
    let out = converter.apply_common(&operands, None, Span::new(0, 5)).unwrap();
    assert_eq!(join_text(&out), "f16(a), b, f16(c)");

    let diags = converter.take_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[0].target_type, Some(Ty::F16));
    assert_eq!(
        diags[0].help.as_deref(),
        Some("convert explicitly with f16(...) to make the conversion intended")
    );
}

#[test]
fn test_pointer_operand_is_dereferenced() {
    let out = Converter::new()
        .apply_common(
            &[operand("light.intensity", "ptr<f32>"), operand("scale", "f32")],
            None,
            Span::dummy(),
        )
        .unwrap();
    assert_eq!(join_text(&out), "(*light.intensity), scale");
}

// ── structural access feeding the resolver ──

#[test]
fn test_swizzle_result_unifies_with_matching_vector() {
    let color: Ty = "vec4f".parse().unwrap();
    let rg = property_access(&color, "rg");
    assert_eq!(rg, Ty::vec(2, Scalar::F32));
    let plan = resolve_common(&[rg, "vec2<f32>".parse().unwrap()], None).unwrap();
    assert_eq!(plan.actions, vec![ConversionAction::Identity; 2]);
}

#[test]
fn test_matrix_column_then_component() {
    let m: Ty = "mat3x2f".parse().unwrap();
    let column = index_access(&m);
    assert_eq!(column, Ty::vec(2, Scalar::F32));
    assert_eq!(property_access(&column, "y"), Ty::F32);
    assert!(property_access(&column, "z").is_unknown());
}

#[test]
fn test_missing_struct_field_is_unknown_and_unresolvable() {
    let s = Ty::Struct(StructTy::new("S", vec![("a".into(), Ty::F32)]).unwrap());
    let missing = property_access(&s, "nonexistent");
    assert!(missing.is_unknown());
    assert!(resolve_common(&[missing, Ty::F32], None).is_none());
}

// ── host values ──

#[test]
fn test_coerced_array_literal() {
    let mut converter = Converter::new();
    let snippet = converter.coerce(&host("[1, 2.5, 3]"), Span::dummy());
    assert_eq!(snippet.ty, Ty::array(Ty::F32, Some(3)));
    assert_eq!(snippet.text, "1, 2.5, 3");
}

#[test]
fn test_unrepresentable_value_fails_at_resolution() {
    let mut converter = Converter::new();
    let mixed = converter.coerce(&host("[1, true, \"x\"]"), Span::dummy());
    assert_eq!(mixed, Snippet::unknown("[1, true, \"x\"]"));
    let err = converter
        .apply_common(&[mixed, operand("y", "f32")], None, Span::dummy())
        .unwrap_err();
    assert!(matches!(err, ConversionError::IncompatibleTypes { .. }));
    assert!(err.to_diagnostic(Span::dummy()).is_error());
}

#[test]
fn test_coerced_scalars_mix_with_operands() {
    let mut converter = Converter::new();
    let three = converter.coerce(&host("3"), Span::dummy());
    let out = converter
        .apply_common(&[three, operand("i", "i32")], None, Span::dummy())
        .unwrap();
    assert_eq!(out, vec![Snippet::new("3", Ty::I32), Snippet::new("i", Ty::I32)]);
}

// ── struct literals ──

fn material() -> StructTy {
    StructTy::new(
        "Material",
        vec![
            ("roughness".into(), Ty::F32),
            ("layers".into(), Ty::U32),
            ("tint".into(), Ty::vec(3, Scalar::F32)),
        ],
    )
    .unwrap()
}

#[test]
fn test_struct_literal_round() {
    let mut values = BTreeMap::new();
    values.insert("tint".to_string(), operand("base.rgb", "vec3f"));
    values.insert("layers".to_string(), operand("count", "i32"));
    values.insert("roughness".to_string(), classify_literal("0.5").unwrap());

    let mut converter = Converter::new();
    let out = converter
        .apply_to_struct(&material(), &values, Span::dummy())
        .unwrap();
    assert_eq!(join_text(&out), "0.5, u32(count), base.rgb");
    assert_eq!(converter.diagnostics().len(), 1);
    assert_eq!(converter.diagnostics()[0].source_types, vec![Ty::I32]);
}

#[test]
fn test_struct_literal_missing_field_is_fatal() {
    let mut values = BTreeMap::new();
    values.insert("roughness".to_string(), classify_literal("1").unwrap());
    let err = Converter::new()
        .apply_to_struct(&material(), &values, Span::dummy())
        .unwrap_err();
    assert_eq!(err.to_string(), "missing field 'layers' in 'Material' literal");
}

// ── options ──

#[test]
fn test_config_file_drives_policy() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("shadecast.toml"),
        "[conversion]\nimplicit_casts = \"deny\"\n",
    )
    .unwrap();
    let options = ConversionOptions::discover(dir.path()).unwrap();
    assert_eq!(options.implicit_casts, ImplicitCastPolicy::Deny);

    let mut converter = Converter::with_options(options);
    let out = converter
        .apply_common(&[operand("a", "i32"), operand("b", "f32")], None, Span::dummy())
        .unwrap();
    assert_eq!(join_text(&out), "f32(a), b");
    assert!(converter.has_errors());
}

// ── re-entrancy ──

#[test]
fn test_converters_on_separate_threads() {
    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["i32", "u32", "f16", "f32"]
            .into_iter()
            .map(|ty| {
                scope.spawn(move || {
                    let mut converter = Converter::new();
                    let out = converter
                        .apply_common(&[operand("a", ty), operand("b", "f16")], None, Span::dummy())
                        .unwrap();
                    join_text(&out)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, vec!["f16(a), b", "f16(a), b", "a, b", "a, f32(b)"]);
}

#[test]
fn test_batch_file_resolution() {
    let lines = parse_batch("u32, f16, i32\nabstract-int, i32 | f32\nf32, vec2f\n").unwrap();
    let targets: Vec<Option<Ty>> = resolve_batch(&lines)
        .into_iter()
        .map(|plan| plan.map(|p| p.target))
        .collect();
    assert_eq!(targets, vec![Some(Ty::F16), Some(Ty::F32), None]);
}
