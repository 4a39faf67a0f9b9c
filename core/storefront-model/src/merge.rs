//! Prop precedence.

use crate::document::Props;
use serde_json::Value;

/// Overlays `overlay` onto `base`. Nested objects merge key by key; any
/// other value (arrays included) replaces what was there.
pub fn merge_into(base: &mut Props, overlay: &Props) {
    for (key, value) in overlay {
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Effective props of a node: type defaults, then stored props, then the
/// props a data resolver produced.
pub fn merge_props(defaults: &Props, stored: &Props, resolved: Option<&Props>) -> Props {
    let mut merged = defaults.clone();
    merge_into(&mut merged, stored);
    if let Some(resolved) = resolved {
        merge_into(&mut merged, resolved);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(v: Value) -> Props {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn stored_overrides_defaults() {
        let defaults = props(json!({"text": "Heading", "size": "m"}));
        let stored = props(json!({"text": "Buy"}));
        let merged = merge_props(&defaults, &stored, None);
        assert_eq!(merged.get("text"), Some(&json!("Buy")));
        assert_eq!(merged.get("size"), Some(&json!("m")));
    }

    #[test]
    fn resolved_overrides_stored() {
        let defaults = props(json!({"resolvedProducts": []}));
        let stored = props(json!({"resolvedProducts": [{"id": "stale"}]}));
        let resolved = props(json!({"resolvedProducts": [{"id": "fresh"}]}));
        let merged = merge_props(&defaults, &stored, Some(&resolved));
        assert_eq!(merged["resolvedProducts"], json!([{"id": "fresh"}]));
    }

    #[test]
    fn nested_objects_merge() {
        let defaults = props(json!({"layout": {"spanCol": 1, "padding": "0px"}}));
        let stored = props(json!({"layout": {"padding": "8px"}}));
        let merged = merge_props(&defaults, &stored, None);
        assert_eq!(merged["layout"], json!({"spanCol": 1, "padding": "8px"}));
    }

    #[test]
    fn arrays_replace() {
        let defaults = props(json!({"stats": [1, 2, 3]}));
        let stored = props(json!({"stats": [9]}));
        let merged = merge_props(&defaults, &stored, None);
        assert_eq!(merged["stats"], json!([9]));
    }
}
