//! Reference translation
//!
//! Exported entities point at each other through ids of the source project.
//! Those ids mean nothing in the target, so references are rewritten in two
//! passes:
//!
//! 1. [`normalize_to_symbolic`] replaces ids of schema entities (languages,
//!    taxonomies and terms, snippets, types, elements, options, content
//!    groups) with their codename or external id.
//! 2. [`resolve_to_target_ids`] replaces the remaining ids (content items,
//!    assets, folders) with the ids the target assigned, read from the
//!    [`ImportLedger`].
//!
//! Both passes walk JSON values uniformly: a reference may sit at any depth
//! of an element payload.

use std::collections::HashMap;

use kontent_import_types::{
    EntityKind, ImportData, ImportError, ImportResult, Reference, DEFAULT_LANGUAGE_ID,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::ledger::ImportLedger;

/// Ids inside rich-text HTML: item links, item objects and assets
static RICH_TEXT_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(data-item-id|data-asset-id|data-type="item" data-id)="([^"]+)""#)
        .expect("rich text reference pattern is valid")
});

/// Ids forced to a given reference regardless of the index
pub type Overrides = HashMap<String, Reference>;

/// The default language keeps its sentinel id in every project
pub fn default_overrides() -> Overrides {
    let mut overrides = Overrides::new();
    overrides.insert(
        DEFAULT_LANGUAGE_ID.to_string(),
        Reference::default_language(),
    );
    overrides
}

/// Source id to symbolic reference, built from the schema collections
#[derive(Debug, Default, Clone)]
pub struct SymbolIndex {
    symbols: HashMap<String, Reference>,
}

impl SymbolIndex {
    /// Index every identifiable object of the languages, taxonomies, snippets and types
    pub fn build(data: &ImportData) -> ImportResult<Self> {
        let mut index = Self::default();
        index.index_value(&serde_json::to_value(&data.languages)?);
        index.index_value(&serde_json::to_value(&data.taxonomies)?);
        index.index_value(&serde_json::to_value(&data.content_type_snippets)?);
        index.index_value(&serde_json::to_value(&data.content_types)?);
        Ok(index)
    }

    fn index_value(&mut self, value: &Value) {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(id)) = map.get("id") {
                    if let Some(symbol) = symbolic_identity(map) {
                        self.symbols.insert(id.clone(), symbol);
                    }
                }
                map.values().for_each(|child| self.index_value(child));
            }
            Value::Array(items) => items.iter().for_each(|child| self.index_value(child)),
            _ => {}
        }
    }

    pub fn get(&self, id: &str) -> Option<&Reference> {
        self.symbols.get(id)
    }

    /// Codename of an indexed id
    pub fn codename(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Reference::as_codename)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn symbolic_identity(map: &Map<String, Value>) -> Option<Reference> {
    if let Some(Value::String(codename)) = map.get("codename") {
        return Some(Reference::codename(codename.clone()));
    }
    if let Some(Value::String(external_id)) = map.get("external_id") {
        return Some(Reference::external_id(external_id.clone()));
    }
    None
}

/// An object made only of identity keys, holding a string id
fn is_reference(map: &Map<String, Value>) -> bool {
    matches!(map.get("id"), Some(Value::String(_)))
        && map
            .keys()
            .all(|key| matches!(key.as_str(), "id" | "codename" | "external_id"))
}

fn reference_map(reference: &Reference) -> Map<String, Value> {
    let (key, value) = match reference {
        Reference::Id(id) => ("id", id),
        Reference::Codename(codename) => ("codename", codename),
        Reference::ExternalId(external_id) => ("external_id", external_id),
    };
    let mut map = Map::new();
    map.insert(key.to_string(), Value::String(value.clone()));
    map
}

/// Rewrite id references of schema entities into codename/external id references
///
/// References whose id is unknown are left untouched unless they already carry
/// a codename or external id, in which case the id is dropped. Returns the
/// number of rewritten references.
pub fn normalize_to_symbolic(
    value: &mut Value,
    index: &SymbolIndex,
    overrides: &Overrides,
) -> usize {
    match value {
        Value::Object(map) if is_reference(map) => {
            let id = match map.get("id") {
                Some(Value::String(id)) => id.clone(),
                _ => return 0,
            };
            if let Some(reference) = overrides.get(&id).or_else(|| index.get(&id)) {
                *map = reference_map(reference);
                1
            } else if map.len() > 1 {
                map.remove("id");
                1
            } else {
                0
            }
        }
        Value::Object(map) => map
            .values_mut()
            .map(|child| normalize_to_symbolic(child, index, overrides))
            .sum(),
        Value::Array(items) => items
            .iter_mut()
            .map(|child| normalize_to_symbolic(child, index, overrides))
            .sum(),
        _ => 0,
    }
}

fn normalize_collection<T>(
    items: &[T],
    index: &SymbolIndex,
    overrides: &Overrides,
) -> ImportResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(items)?;
    normalize_to_symbolic(&mut value, index, overrides);
    Ok(serde_json::from_value(value)?)
}

/// Normalize every collection of a (filtered) import before anything is sent
///
/// Variants keep their own `item` and `language` references: they identify
/// the variant in the ledger and are resolved when it is upserted. Only their
/// element payloads are normalized.
pub fn normalize_import_data(data: &ImportData, index: &SymbolIndex) -> ImportResult<ImportData> {
    let overrides = default_overrides();

    let mut language_variants = data.language_variants.clone();
    for variant in language_variants.iter_mut() {
        let mut elements = Value::Array(std::mem::take(&mut variant.elements));
        normalize_to_symbolic(&mut elements, index, &overrides);
        variant.elements = match elements {
            Value::Array(elements) => elements,
            _ => Vec::new(),
        };
    }

    Ok(ImportData {
        languages: normalize_collection(&data.languages, index, &overrides)?,
        taxonomies: normalize_collection(&data.taxonomies, index, &overrides)?,
        content_type_snippets: normalize_collection(
            &data.content_type_snippets,
            index,
            &overrides,
        )?,
        content_types: normalize_collection(&data.content_types, index, &overrides)?,
        asset_folders: data.asset_folders.clone(),
        assets: normalize_collection(&data.assets, index, &overrides)?,
        content_items: normalize_collection(&data.content_items, index, &overrides)?,
        language_variants,
        workflow_steps: data.workflow_steps.clone(),
    })
}

/// Fail on any reference still expressed as a bare source id
///
/// Schema payloads must be fully symbolic before they are sent; a leftover id
/// points at an entity that was filtered out or never exported.
pub fn ensure_symbolic(value: &Value, context: &str) -> ImportResult<()> {
    match value {
        Value::Object(map) if is_reference(map) => match map.get("id") {
            Some(Value::String(id)) if map.len() == 1 && id != DEFAULT_LANGUAGE_ID => {
                Err(ImportError::UnresolvedReference {
                    id: id.clone(),
                    expected: format!("codename reference in {}", context),
                })
            }
            _ => Ok(()),
        },
        Value::Object(map) => map
            .values()
            .try_for_each(|child| ensure_symbolic(child, context)),
        Value::Array(items) => items
            .iter()
            .try_for_each(|child| ensure_symbolic(child, context)),
        _ => Ok(()),
    }
}

/// Rewrite remaining source ids into ids assigned by the target
///
/// Every bare id reference must resolve to an entry of one of `kinds`;
/// rich-text HTML attributes are resolved against items and assets. An
/// unknown id is fatal. Returns the number of rewritten references.
pub fn resolve_to_target_ids(
    value: &mut Value,
    ledger: &ImportLedger,
    kinds: &[EntityKind],
) -> ImportResult<usize> {
    match value {
        Value::Object(map) if is_reference(map) => {
            let id = match map.get("id") {
                Some(Value::String(id)) => id.clone(),
                _ => return Ok(0),
            };
            if id == DEFAULT_LANGUAGE_ID {
                return Ok(0);
            }
            match ledger.find(kinds, &id) {
                Some((_, imported_id)) => {
                    *map = reference_map(&Reference::id(imported_id));
                    Ok(1)
                }
                None => Err(ImportError::UnresolvedReference {
                    id,
                    expected: describe_kinds(kinds),
                }),
            }
        }
        Value::Object(map) => {
            let mut count = 0;
            for child in map.values_mut() {
                count += resolve_to_target_ids(child, ledger, kinds)?;
            }
            Ok(count)
        }
        Value::Array(items) => {
            let mut count = 0;
            for child in items.iter_mut() {
                count += resolve_to_target_ids(child, ledger, kinds)?;
            }
            Ok(count)
        }
        Value::String(text) if RICH_TEXT_REFERENCE.is_match(text) => {
            let (rewritten, count) = resolve_rich_text(text, ledger)?;
            *text = rewritten;
            Ok(count)
        }
        _ => Ok(0),
    }
}

fn resolve_rich_text(html: &str, ledger: &ImportLedger) -> ImportResult<(String, usize)> {
    let mut output = String::with_capacity(html.len());
    let mut last = 0;
    let mut count = 0;

    for captures in RICH_TEXT_REFERENCE.captures_iter(html) {
        let (Some(whole), Some(attribute), Some(id)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        let kind = if attribute.as_str() == "data-asset-id" {
            EntityKind::Asset
        } else {
            EntityKind::ContentItem
        };
        let imported_id =
            ledger
                .lookup(kind, id.as_str())
                .ok_or_else(|| ImportError::UnresolvedReference {
                    id: id.as_str().to_string(),
                    expected: format!("{} in rich text", kind),
                })?;

        output.push_str(&html[last..whole.start()]);
        output.push_str(attribute.as_str());
        output.push_str("=\"");
        output.push_str(imported_id);
        output.push('"');
        last = whole.end();
        count += 1;
    }
    output.push_str(&html[last..]);

    Ok((output, count))
}

/// Drop source ids from nested objects that carry a codename or external id
///
/// The target assigns new ids to elements, terms and options on creation.
pub fn strip_nested_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("id")
                && (map.contains_key("codename") || map.contains_key("external_id"))
            {
                map.remove("id");
            }
            map.values_mut().for_each(strip_nested_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nested_ids),
        _ => {}
    }
}

fn describe_kinds(kinds: &[EntityKind]) -> String {
    let names: Vec<&str> = kinds.iter().map(EntityKind::as_str).collect();
    format!("imported {}", names.join(" or "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontent_import_types::{ContentTypeContract, LanguageContract, TaxonomyContract};
    use serde_json::json;

    fn sample_data() -> ImportData {
        ImportData {
            languages: vec![
                LanguageContract {
                    id: DEFAULT_LANGUAGE_ID.to_string(),
                    name: "English".to_string(),
                    codename: "en-US".to_string(),
                    external_id: None,
                    is_active: true,
                    is_default: true,
                    fallback_language: None,
                },
                LanguageContract {
                    id: "lang-cz".to_string(),
                    name: "Czech".to_string(),
                    codename: "cs-CZ".to_string(),
                    external_id: None,
                    is_active: true,
                    is_default: false,
                    fallback_language: Some(Reference::default_language()),
                },
            ],
            taxonomies: vec![TaxonomyContract {
                id: "tax-1".to_string(),
                name: "Topics".to_string(),
                codename: "topics".to_string(),
                external_id: None,
                last_modified: None,
                terms: vec![json!({
                    "id": "term-1",
                    "name": "Rust",
                    "codename": "rust",
                    "terms": [{ "id": "term-2", "name": "Async", "codename": "async", "terms": [] }]
                })],
            }],
            content_types: vec![ContentTypeContract {
                id: "type-1".to_string(),
                name: "Article".to_string(),
                codename: "article".to_string(),
                external_id: None,
                last_modified: None,
                elements: vec![
                    json!({ "id": "el-title", "codename": "title", "type": "text" }),
                    json!({
                        "id": "el-topics",
                        "codename": "topics",
                        "type": "taxonomy",
                        "taxonomy_group": { "id": "tax-1" }
                    }),
                ],
                content_groups: vec![],
            }],
            ..Default::default()
        }
    }

    fn ledger_with_items() -> ImportLedger {
        let mut ledger = ImportLedger::new();
        ledger
            .record(EntityKind::ContentItem, "item-x", "new-x", json!({}), json!({}))
            .unwrap();
        ledger
            .record(EntityKind::Asset, "asset-y", "new-y", json!({}), json!({}))
            .unwrap();
        ledger
    }

    #[test]
    fn test_index_covers_nested_terms_and_elements() {
        let index = SymbolIndex::build(&sample_data()).unwrap();

        assert_eq!(index.codename("term-2"), Some("async"));
        assert_eq!(index.codename("el-topics"), Some("topics"));
        assert_eq!(index.codename("lang-cz"), Some("cs-CZ"));
        assert_eq!(index.codename("type-1"), Some("article"));
    }

    #[test]
    fn test_normalize_rewrites_references_at_any_depth() {
        let index = SymbolIndex::build(&sample_data()).unwrap();
        let mut value = json!({
            "elements": [
                {
                    "element": { "id": "el-topics" },
                    "value": [{ "id": "term-1" }, { "id": "term-2" }]
                },
                { "element": { "id": "el-title" }, "value": "Hello" }
            ]
        });

        let count = normalize_to_symbolic(&mut value, &index, &default_overrides());

        assert_eq!(count, 4);
        assert_eq!(
            value,
            json!({
                "elements": [
                    {
                        "element": { "codename": "topics" },
                        "value": [{ "codename": "rust" }, { "codename": "async" }]
                    },
                    { "element": { "codename": "title" }, "value": "Hello" }
                ]
            })
        );
    }

    #[test]
    fn test_normalize_keeps_default_language_sentinel() {
        let index = SymbolIndex::build(&sample_data()).unwrap();
        let mut value = json!({ "language": { "id": DEFAULT_LANGUAGE_ID } });

        normalize_to_symbolic(&mut value, &index, &default_overrides());

        assert_eq!(value, json!({ "language": { "id": DEFAULT_LANGUAGE_ID } }));
    }

    #[test]
    fn test_normalize_leaves_unknown_ids_and_entity_ids() {
        let index = SymbolIndex::build(&sample_data()).unwrap();
        let mut value = json!({
            "id": "el-title",
            "codename": "title",
            "name": "Title",
            "value": [{ "id": "item-x" }]
        });

        normalize_to_symbolic(&mut value, &index, &Overrides::new());

        assert_eq!(value["id"], json!("el-title"));
        assert_eq!(value["value"], json!([{ "id": "item-x" }]));
    }

    #[test]
    fn test_normalize_import_data_keeps_variant_identity() {
        use kontent_import_types::{ContentItemContract, LanguageVariantContract};

        let mut data = sample_data();
        data.content_items = vec![ContentItemContract {
            id: "item-x".to_string(),
            name: "Item".to_string(),
            codename: "item".to_string(),
            content_type: Reference::id("type-1"),
            external_id: None,
            last_modified: None,
        }];
        data.language_variants = vec![LanguageVariantContract {
            item: Reference::id("item-x"),
            language: Reference::id("lang-cz"),
            elements: vec![json!({ "element": { "id": "el-title" }, "value": "Ahoj" })],
            workflow_step: None,
            last_modified: None,
        }];
        let index = SymbolIndex::build(&data).unwrap();

        let normalized = normalize_import_data(&data, &index).unwrap();

        assert_eq!(normalized.content_items[0].content_type, Reference::codename("article"));
        assert_eq!(
            normalized.languages[1].fallback_language,
            Some(Reference::default_language())
        );
        let variant = &normalized.language_variants[0];
        assert_eq!(variant.language, Reference::id("lang-cz"));
        assert_eq!(variant.elements[0]["element"], json!({ "codename": "title" }));
        assert_eq!(data.content_items[0].content_type, Reference::id("type-1"));
    }

    #[test]
    fn test_ensure_symbolic_reports_leftover_id() {
        let value = json!({ "elements": [{ "type": "snippet", "snippet": { "id": "gone" } }] });

        let result = ensure_symbolic(&value, "content type 'article'");

        assert!(matches!(
            result,
            Err(ImportError::UnresolvedReference { ref id, .. }) if id == "gone"
        ));
        assert!(ensure_symbolic(&json!({ "snippet": { "codename": "seo" } }), "x").is_ok());
    }

    #[test]
    fn test_resolve_rewrites_nested_list_references() {
        let ledger = ledger_with_items();
        let mut value = json!([
            { "element": { "codename": "related" }, "value": [{ "id": "item-x" }] },
            { "element": { "codename": "gallery" }, "value": [[{ "id": "asset-y" }]] }
        ]);

        let count = resolve_to_target_ids(
            &mut value,
            &ledger,
            &[EntityKind::ContentItem, EntityKind::Asset],
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(value[0]["value"], json!([{ "id": "new-x" }]));
        assert_eq!(value[1]["value"], json!([[{ "id": "new-y" }]]));
    }

    #[test]
    fn test_resolve_fails_on_unknown_id() {
        let ledger = ledger_with_items();
        let mut value = json!({ "value": [{ "id": "missing" }] });

        let result = resolve_to_target_ids(&mut value, &ledger, &[EntityKind::ContentItem]);

        assert!(matches!(
            result,
            Err(ImportError::UnresolvedReference { ref id, .. }) if id == "missing"
        ));
    }

    #[test]
    fn test_resolve_rewrites_rich_text_attributes() {
        let ledger = ledger_with_items();
        let mut value = json!({
            "value": "<p><a data-item-id=\"item-x\">link</a></p>\
                      <object type=\"application/kenticocloud\" data-type=\"item\" data-id=\"item-x\"></object>\
                      <figure data-asset-id=\"asset-y\"><img src=\"#\" data-asset-id=\"asset-y\"></figure>\
                      <object type=\"application/kenticocloud\" data-type=\"component\" data-id=\"c1\"></object>"
        });

        let count = resolve_to_target_ids(
            &mut value,
            &ledger,
            &[EntityKind::ContentItem, EntityKind::Asset],
        )
        .unwrap();

        let html = value["value"].as_str().unwrap();
        assert_eq!(count, 4);
        assert!(html.contains("data-item-id=\"new-x\""));
        assert!(html.contains("data-type=\"item\" data-id=\"new-x\""));
        assert!(html.contains("<figure data-asset-id=\"new-y\">"));
        assert!(html.contains("data-type=\"component\" data-id=\"c1\""));
        assert!(!html.contains("item-x"));
    }

    #[test]
    fn test_strip_nested_ids() {
        let mut value = json!([{
            "id": "term-1",
            "codename": "rust",
            "terms": [{ "id": "term-2", "codename": "async", "terms": [] }]
        }, { "id": DEFAULT_LANGUAGE_ID }]);

        strip_nested_ids(&mut value);

        assert_eq!(
            value,
            json!([{
                "codename": "rust",
                "terms": [{ "codename": "async", "terms": [] }]
            }, { "id": DEFAULT_LANGUAGE_ID }])
        );
    }
}
