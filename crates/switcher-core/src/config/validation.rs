//! Config validation - warns about unknown fields

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Validate JSON config and warn about unknown fields.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    for path in find_unknown_keys(&value, &expected_config_keys(), "") {
        warn!("Unknown config field in {config_name}: {path}");
    }
}

/// Find unknown keys in JSON value compared to expected keys.
/// Returns paths like "layout.unknownField" for unknown fields.
fn find_unknown_keys(value: &Value, expected: &ExpectedKeys, prefix: &str) -> Vec<String> {
    let mut unknowns = Vec::new();

    let Value::Object(obj) = value else {
        return unknowns;
    };

    for (key, child) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if let Some(nested) = expected.nested.get(key.as_str()) {
            unknowns.extend(find_unknown_keys(child, nested, &path));
        } else if !expected.fields.contains(key.as_str()) {
            unknowns.push(path);
        }
    }

    unknowns
}

/// `fields` are leaf fields, `nested` are objects with their own keys.
struct ExpectedKeys {
    fields: HashSet<&'static str>,
    nested: HashMap<&'static str, ExpectedKeys>,
}

impl ExpectedKeys {
    fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
            nested: HashMap::new(),
        }
    }

    fn with_nested(mut self, key: &'static str, nested: ExpectedKeys) -> Self {
        self.nested.insert(key, nested);
        self
    }
}

fn sides_keys() -> ExpectedKeys {
    ExpectedKeys::new(&["left", "right", "top", "bottom"])
}

fn expected_config_keys() -> ExpectedKeys {
    let timing_keys = ExpectedKeys::new(&[
        "revealDelayMs",
        "hoverDisableMs",
        "hoverEnterDelayMs",
        "thumbnailDelayMs",
        "scrollMs",
        "fadeOutMs",
    ]);

    let layout_keys = ExpectedKeys::new(&[
        "iconSizes",
        "itemSpacing",
        "separatorWidth",
        "itemBorder",
        "labelHeight",
        "thumbnailLabelSpacing",
    ])
    .with_nested("overlayPadding", sides_keys())
    .with_nested("stripPadding", sides_keys())
    .with_nested("itemPadding", sides_keys());

    let thumbnail_keys = ExpectedKeys::new(&["enabled", "maxSize"]);

    ExpectedKeys::new(&["bindings", "ignoredModifiers"])
        .with_nested("timing", timing_keys)
        .with_nested("layout", layout_keys)
        .with_nested("thumbnails", thumbnail_keys)
}
