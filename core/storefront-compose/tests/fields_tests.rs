mod common;

use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use storefront_model::{FieldSpec, Props};

fn layout_keys(fields: &storefront_model::FieldMap) -> Vec<String> {
    match fields.get("layout") {
        Some(FieldSpec::Object { object_fields, .. }) => {
            object_fields.names().map(str::to_string).collect()
        }
        other => panic!("expected layout object field, got {other:?}"),
    }
}

// ── Parent-aware layout fields ───────────────────────────────────

#[test]
fn grid_cell_gets_spans_and_padding() {
    let f = fixture();
    let fields = f
        .registry
        .effective_fields("Text", &Props::new(), Some("Grid"))
        .unwrap();
    assert_eq!(layout_keys(&fields), vec!["spanCol", "spanRow", "padding"]);
    assert!(fields.contains("text"));
}

#[test]
fn flex_item_gets_grow_and_padding() {
    let f = fixture();
    let fields = f
        .registry
        .effective_fields("Heading", &Props::new(), Some("Flex"))
        .unwrap();
    assert_eq!(layout_keys(&fields), vec!["grow", "padding"]);
}

#[test]
fn top_level_gets_padding_only() {
    let f = fixture();
    let fields = f
        .registry
        .effective_fields("Heading", &Props::new(), None)
        .unwrap();
    assert_eq!(layout_keys(&fields), vec!["padding"]);
}

#[test]
fn unknown_parent_falls_back_to_standalone() {
    let f = fixture();
    let fields = f
        .registry
        .effective_fields("Heading", &Props::new(), Some("NoSuchContainer"))
        .unwrap();
    assert_eq!(layout_keys(&fields), vec!["padding"]);
}

#[test]
fn non_layout_parent_is_standalone() {
    let f = fixture();
    let fields = f
        .registry
        .effective_fields("Text", &Props::new(), Some("Hero"))
        .unwrap();
    assert_eq!(layout_keys(&fields), vec!["padding"]);
}

#[test]
fn block_components_keep_static_fields() {
    let f = fixture();
    let fields = f
        .registry
        .effective_fields("Grid", &Props::new(), Some("Grid"))
        .unwrap();
    let names: Vec<&str> = fields.names().collect();
    assert_eq!(names, vec!["numColumns", "items"]);
}

#[test]
fn unknown_component_is_an_error() {
    let f = fixture();
    assert!(f.registry.effective_fields("Nope", &Props::new(), None).is_err());
}

#[test]
fn garbage_props_still_resolve() {
    let f = fixture();
    let mut props = Props::new();
    props.insert("text".into(), json!({"not": "a string"}));
    let fields = f
        .registry
        .effective_fields("Heading", &props, Some("Grid"))
        .unwrap();
    assert!(fields.contains("layout"));
}

// ── Subset property ──────────────────────────────────────────────

fn parent_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Grid".to_string())),
        Just(Some("Flex".to_string())),
        Just(Some("Hero".to_string())),
        "[A-Za-z]{1,10}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn effective_fields_are_subset_of_declared(
        type_index in 0usize..7,
        parent in parent_strategy(),
        text in ".{0,12}",
        span in 0u32..20,
    ) {
        let f = fixture();
        let names: Vec<String> = f.registry.names().map(str::to_string).collect();
        let component_type = &names[type_index % names.len()];
        let mut props = Props::new();
        props.insert("text".into(), json!(text));
        props.insert("layout".into(), json!({"spanCol": span}));

        let effective = f
            .registry
            .effective_fields(component_type, &props, parent.as_deref())
            .unwrap();
        let declared = f.registry.get(component_type).unwrap().fields();
        prop_assert!(effective.is_subset_of(declared));
    }
}
