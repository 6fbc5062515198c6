//! Strings, regular expressions, JSON, paths and collections

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::harness::FeatureCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// All email-looking words in `text`, in order of appearance
pub fn find_emails(text: &str) -> anyhow::Result<Vec<String>> {
    let pattern = Regex::new(r"\b\w+@\w+\.\w+\b")?;
    Ok(pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Occurrences of each whitespace separated word
pub fn word_count(text: &str) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

/// `base` overlaid with `overrides`, later keys winning
pub fn merge_config(
    base: &BTreeMap<String, Value>,
    overrides: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    base.iter()
        .chain(overrides.iter())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

pub(super) fn cases() -> Vec<FeatureCase> {
    vec![
        FeatureCase::new("regex_emails", || {
            find_emails("Contact us at support@example.com or sales@company.org")
        }),
        FeatureCase::new("json_round_trip", || {
            let data = json!({ "name": "John", "age": 30, "city": "New York" });
            let encoded = serde_json::to_string_pretty(&data)?;
            let decoded: Value = serde_json::from_str(&encoded)?;
            anyhow::ensure!(decoded == data, "round trip changed the document");
            Ok(json!({ "encoded_len": encoded.len(), "decoded": decoded }))
        }),
        FeatureCase::new("string_operations", || {
            let text = "  Hello, World!  ";
            Ok(json!({
                "stripped": text.trim(),
                "upper": text.to_uppercase(),
                "split": text.split(',').collect::<Vec<_>>(),
                "replaced": text.replace("World", "Rust"),
            }))
        }),
        FeatureCase::new("path_operations", || {
            let path = Path::new("/srv/catalog/src/main.rs");
            Ok(json!({
                "file_name": path.file_name().map(|n| n.to_string_lossy()),
                "extension": path.extension().map(|e| e.to_string_lossy()),
                "parent": path.parent().map(|p| p.display().to_string()),
            }))
        }),
        FeatureCase::new("word_count", || {
            let counts = word_count("hello world hello rust");
            Ok(json!(counts))
        }),
        FeatureCase::new("named_point", || {
            let point = Point { x: 10, y: 20 };
            let Point { x, y } = point;
            Ok(json!({ "point": point, "summary": format!("Point: x={}, y={}", x, y) }))
        }),
        FeatureCase::new("set_operations", || {
            let set1: BTreeSet<i32> = [1, 2, 3, 4].into();
            let set2: BTreeSet<i32> = [3, 4, 5, 6].into();
            Ok(json!({
                "union": set1.union(&set2).collect::<Vec<_>>(),
                "intersection": set1.intersection(&set2).collect::<Vec<_>>(),
                "difference": set1.difference(&set2).collect::<Vec<_>>(),
            }))
        }),
        FeatureCase::new("config_merge", || {
            let defaults: BTreeMap<String, Value> =
                [("timeout".to_string(), json!(30)), ("retries".to_string(), json!(3))].into();
            let config: BTreeMap<String, Value> = [
                ("url".to_string(), json!("example.com")),
                ("retries".to_string(), json!(5)),
                ("debug".to_string(), json!(true)),
            ]
            .into();
            Ok(merge_config(&defaults, &config))
        }),
    ]
}
