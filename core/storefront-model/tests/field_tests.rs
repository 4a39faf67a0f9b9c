use pretty_assertions::assert_eq;
use serde_json::json;
use storefront_model::{FieldMap, FieldSpec, SelectOption};

// ── Constructors ─────────────────────────────────────────────────

#[test]
fn text_field_with_label_and_placeholder() {
    let f = FieldSpec::text().labeled("Button text").placeholder("Button text...");
    assert_eq!(f.kind(), "text");
    assert_eq!(f.label(), Some("Button text"));
}

#[test]
fn placeholder_ignored_on_non_text() {
    let f = FieldSpec::number().placeholder("nope");
    assert_eq!(f, FieldSpec::number());
}

#[test]
fn slot_disallow_list() {
    let f = FieldSpec::slot().disallowing(&["Hero", "Navbar", "Footer"]);
    assert!(f.is_slot());
    assert_eq!(f.disallowed(), ["Hero", "Navbar", "Footer"]);
    assert!(FieldSpec::text().disallowed().is_empty());
}

#[test]
fn select_options_from_pairs() {
    let f = FieldSpec::select(&[("2 Columns", "2"), ("3 Columns", "3")]);
    match f {
        FieldSpec::Select { options, .. } => {
            assert_eq!(options.len(), 2);
            assert_eq!(options[1], SelectOption::new("3 Columns", "3"));
        }
        other => panic!("expected select, got {other:?}"),
    }
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn number_field_serializes_like_editor_config() {
    let f = FieldSpec::number_range(1.0, 12.0).labeled("Number of columns");
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(
        v,
        json!({"type": "number", "label": "Number of columns", "min": 1.0, "max": 12.0})
    );
}

#[test]
fn array_field_uses_array_fields_key() {
    let f = FieldSpec::array(
        FieldMap::new()
            .with("value", FieldSpec::text())
            .with("label", FieldSpec::text()),
    );
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(
        v,
        json!({"type": "array", "arrayFields": {"value": {"type": "text"}, "label": {"type": "text"}}})
    );
}

#[test]
fn field_map_preserves_declaration_order() {
    let map = FieldMap::new()
        .with("heading", FieldSpec::text())
        .with("columns", FieldSpec::select(&[("2", "2")]))
        .with("maxProducts", FieldSpec::number());
    let names: Vec<&str> = map.names().collect();
    assert_eq!(names, vec!["heading", "columns", "maxProducts"]);

    let json = serde_json::to_string(&map).unwrap();
    let back: FieldMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}

#[test]
fn deserialize_slot_field() {
    let f: FieldSpec = serde_json::from_value(json!({"type": "slot", "disallow": ["Hero"]})).unwrap();
    assert_eq!(f.disallowed(), ["Hero"]);
}

// ── Subsets ──────────────────────────────────────────────────────

fn layout_superset() -> FieldMap {
    FieldMap::new().with("text", FieldSpec::textarea()).with(
        "layout",
        FieldSpec::object(
            FieldMap::new()
                .with("spanCol", FieldSpec::number())
                .with("grow", FieldSpec::radio(&[("true", "true")]))
                .with("padding", FieldSpec::select(&[("0px", "0px")])),
        ),
    )
}

#[test]
fn narrowed_object_is_subset() {
    let narrowed = FieldMap::new().with(
        "layout",
        FieldSpec::object(FieldMap::new().with("padding", FieldSpec::select(&[("0px", "0px")]))),
    );
    assert!(narrowed.is_subset_of(&layout_superset()));
}

#[test]
fn unknown_key_is_not_subset() {
    let extra = FieldMap::new().with("colour", FieldSpec::text());
    assert!(!extra.is_subset_of(&layout_superset()));
}

#[test]
fn unknown_nested_key_is_not_subset() {
    let extra = FieldMap::new().with(
        "layout",
        FieldSpec::object(FieldMap::new().with("margin", FieldSpec::text())),
    );
    assert!(!extra.is_subset_of(&layout_superset()));
}

#[test]
fn kind_change_is_not_subset() {
    let changed = FieldMap::new().with("text", FieldSpec::number());
    assert!(!changed.is_subset_of(&layout_superset()));
}

#[test]
fn only_keeps_order() {
    let map = layout_superset();
    let only = map.only(&["layout"]);
    assert_eq!(only.len(), 1);
    assert!(only.contains("layout"));
    assert!(!only.contains("text"));
}
