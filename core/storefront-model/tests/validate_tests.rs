use serde_json::{json, Map, Value};
use storefront_model::{validate_props, FieldMap, FieldSpec, LayoutContext, LayoutProps, ViolationKind};

fn props(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => panic!("expected object"),
    }
}

fn stats_schema() -> FieldMap {
    FieldMap::new()
        .with("heading", FieldSpec::text())
        .with("columns", FieldSpec::select(&[("2", "2"), ("3", "3")]))
        .with("maxProducts", FieldSpec::number_range(1.0, 50.0))
        .with(
            "stats",
            FieldSpec::array(
                FieldMap::new()
                    .with("value", FieldSpec::text())
                    .with("label", FieldSpec::text()),
            ),
        )
        .with("items", FieldSpec::slot())
        .with("resolvedProducts", FieldSpec::custom())
}

// ── Conforming props ─────────────────────────────────────────────

#[test]
fn conforming_props_have_no_violations() {
    let p = props(json!({
        "id": "x-1",
        "heading": "Hi",
        "columns": "3",
        "maxProducts": 6,
        "stats": [{"value": "394", "label": "NEW TODAY"}],
        "items": [{"type": "Card", "props": {"id": "c1"}}],
        "resolvedProducts": [{"anything": true}]
    }));
    assert!(validate_props(&stats_schema(), &p).is_empty());
}

#[test]
fn null_counts_as_unset() {
    let p = props(json!({"heading": null, "maxProducts": null}));
    assert!(validate_props(&stats_schema(), &p).is_empty());
}

// ── Violations ───────────────────────────────────────────────────

#[test]
fn unknown_field_reported() {
    let v = validate_props(&stats_schema(), &props(json!({"colour": "red"})));
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "colour");
    assert_eq!(v[0].kind, ViolationKind::UnknownField);
}

#[test]
fn wrong_type_reported() {
    let v = validate_props(&stats_schema(), &props(json!({"heading": 5})));
    assert_eq!(
        v[0].kind,
        ViolationKind::WrongType { expected: "string", found: "number" }
    );
}

#[test]
fn out_of_range_reported() {
    let v = validate_props(&stats_schema(), &props(json!({"maxProducts": 99})));
    assert_eq!(v[0].kind, ViolationKind::OutOfRange { value: 99.0 });
}

#[test]
fn select_value_must_be_an_option() {
    let v = validate_props(&stats_schema(), &props(json!({"columns": "7"})));
    assert_eq!(v[0].kind, ViolationKind::NotAnOption);
}

#[test]
fn array_items_are_checked() {
    let v = validate_props(
        &stats_schema(),
        &props(json!({"stats": [{"value": "1", "label": "ok"}, {"value": 2}, "x"]})),
    );
    let paths: Vec<&str> = v.iter().map(|x| x.path.as_str()).collect();
    assert_eq!(paths, vec!["stats[1].value", "stats[2]"]);
}

#[test]
fn slot_entries_must_be_nodes() {
    let v = validate_props(&stats_schema(), &props(json!({"items": [{"type": "Card"}]})));
    assert_eq!(v[0].path, "items[0]");
    assert_eq!(v[0].kind, ViolationKind::MalformedNode);
}

#[test]
fn violation_display_names_path() {
    let v = validate_props(&stats_schema(), &props(json!({"maxProducts": "six"})));
    assert_eq!(v[0].to_string(), "maxProducts: expected number, found string");
}

// ── Layout ───────────────────────────────────────────────────────

#[test]
fn layout_keys_per_context() {
    assert_eq!(LayoutContext::Standalone.layout_keys(), ["padding"]);
    assert_eq!(LayoutContext::GridCell.layout_keys(), ["spanCol", "spanRow", "padding"]);
    assert_eq!(LayoutContext::FlexItem.layout_keys(), ["grow", "padding"]);
}

#[test]
fn layout_spans_are_clamped() {
    let l = LayoutProps {
        span_col: Some(20.0),
        span_row: Some(-3.0),
        ..Default::default()
    };
    assert_eq!(l.grid_column().as_deref(), Some("span 12"));
    assert_eq!(l.grid_row().as_deref(), Some("span 1"));
}

#[test]
fn layout_zero_span_is_unset() {
    let l = LayoutProps {
        span_col: Some(0.0),
        ..Default::default()
    };
    assert_eq!(l.grid_column(), None);
}

#[test]
fn layout_grow() {
    let grow = LayoutProps { grow: Some(true), ..Default::default() };
    assert_eq!(grow.flex(), Some("1 1 0"));
    assert_eq!(LayoutProps::default().flex(), None);
}

#[test]
fn layout_props_camel_case() {
    let l: LayoutProps = serde_json::from_value(json!({"spanCol": 2, "padding": "8px"})).unwrap();
    assert_eq!(l.span_col, Some(2.0));
    assert_eq!(l.padding.as_deref(), Some("8px"));
    assert_eq!(
        serde_json::to_value(LayoutProps::frame_defaults()).unwrap(),
        json!({"spanCol": 1.0, "spanRow": 1.0, "grow": false, "padding": "0px"})
    );
}
