use std::collections::HashSet;
use std::str::FromStr;
use storefront_types::NodeId;

// ── NodeId ────────────────────────────────────────────────────────

#[test]
fn generated_ids_are_unique() {
    let a = NodeId::generate("Heading");
    let b = NodeId::generate("Heading");
    assert_ne!(a, b);
}

#[test]
fn generated_id_is_prefixed_with_type() {
    let id = NodeId::generate("ProductGrid");
    assert!(id.as_str().starts_with("ProductGrid-"));
    assert!(id.is_valid());
}

#[test]
fn parse_accepts_editor_authored_ids() {
    let id = NodeId::parse("heading-1").unwrap();
    assert_eq!(id.as_str(), "heading-1");
    assert_eq!(id.to_string(), "heading-1");
}

#[test]
fn parse_rejects_blank() {
    assert!(NodeId::parse("").is_err());
    assert!(NodeId::parse("   ").is_err());
    assert!(NodeId::from_str("").is_err());
}

#[test]
fn hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(NodeId::from("card-1"));
    set.insert(NodeId::from("card-1"));
    set.insert(NodeId::from("card-2"));
    assert_eq!(set.len(), 2);
}

#[test]
fn serde_is_transparent_string() {
    let id = NodeId::from("text-1");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"text-1\"");
    let parsed: NodeId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn empty_id_deserializes_but_is_not_valid() {
    let parsed: NodeId = serde_json::from_str("\"\"").unwrap();
    assert!(!parsed.is_valid());
}
