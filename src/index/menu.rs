// src/index/menu.rs
// =============================================================================
// A typed view of menu-index.json that writes back what it read.
//
// The file looks like:
//
//   { "sections": [ { "title_tr": "...", "children": [ ... ] }, ... ] }
//
// Entries carry many keys we never touch. We keep each object as an ordered
// JSON map (serde_json with `preserve_order`) and lift only the nested list
// ("sections" at the top, "children" below) into typed vectors so we can walk
// and mutate the tree. On serialization the nested list goes back into the
// slot it came from, so key order survives a load/save round trip.
// =============================================================================

use crate::error::{DocsError, Result};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

const SECTIONS: &str = "sections";
const CHILDREN: &str = "children";
const TITLE_TR: &str = "title_tr";
const ACTUAL_FILE: &str = "actual_file";
const OLD_DOC_URL: &str = "old_doc_url";

// Pulls `key` out of `fields` as a typed list, leaving a Null placeholder in
// its slot. Returns None when the key is absent or not an array.
fn take_nested<E: de::Error>(
    fields: &mut Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<Vec<MenuEntry>>, E> {
    match fields.get_mut(key) {
        Some(slot @ Value::Array(_)) => serde_json::from_value(slot.take())
            .map(Some)
            .map_err(E::custom),
        _ => Ok(None),
    }
}

fn serialize_with_nested<S: Serializer>(
    serializer: S,
    fields: &Map<String, Value>,
    key: &str,
    nested: Option<&Vec<MenuEntry>>,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (k, v) in fields {
        match nested {
            Some(entries) if k == key => map.serialize_entry(k, entries)?,
            _ => map.serialize_entry(k, v)?,
        }
    }
    map.end()
}

/// One node of the menu tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuEntry {
    fields: Map<String, Value>,
    /// None when the entry had no "children" array
    children: Option<Vec<MenuEntry>>,
}

impl MenuEntry {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Turkish title, if present
    pub fn title_tr(&self) -> Option<&str> {
        self.str_field(TITLE_TR)
    }

    /// Root-relative path of the page this entry points at
    pub fn actual_file(&self) -> Option<&str> {
        self.str_field(ACTUAL_FILE).filter(|s| !s.is_empty())
    }

    /// Legacy documentation URL, treating "" and null as absent
    pub fn old_doc_url(&self) -> Option<&str> {
        self.str_field(OLD_DOC_URL).filter(|s| !s.is_empty())
    }

    // Any non-empty value counts, even one that is not a string: it was put
    // there on purpose and must not be overwritten.
    pub fn has_old_doc_url(&self) -> bool {
        match self.fields.get(OLD_DOC_URL) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Number(_)) => true,
        }
    }

    /// Sets "old_doc_url". An existing key keeps its position; a new one is appended.
    pub fn set_old_doc_url(&mut self, url: &str) {
        self.fields.insert(OLD_DOC_URL.to_string(), Value::String(url.to_string()));
    }

    pub fn children(&self) -> &[MenuEntry] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_mut(&mut self) -> &mut [MenuEntry] {
        self.children.as_deref_mut().unwrap_or(&mut [])
    }
}

impl<'de> Deserialize<'de> for MenuEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let children = take_nested::<D::Error>(&mut fields, CHILDREN)?;
        Ok(MenuEntry { fields, children })
    }
}

impl Serialize for MenuEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_with_nested(serializer, &self.fields, CHILDREN, self.children.as_ref())
    }
}

/// The whole menu-index.json document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuIndex {
    fields: Map<String, Value>,
    sections: Option<Vec<MenuEntry>>,
}

impl<'de> Deserialize<'de> for MenuIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let sections = take_nested::<D::Error>(&mut fields, SECTIONS)?;
        Ok(MenuIndex { fields, sections })
    }
}

impl Serialize for MenuIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_with_nested(serializer, &self.fields, SECTIONS, self.sections.as_ref())
    }
}

impl MenuIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DocsError::read(path, e))?;
        Self::from_json(&text).map_err(|e| DocsError::json(path, e))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Pretty JSON with two-space indentation; non-ASCII text is written as is.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json().map_err(|e| DocsError::json(path, e))?;
        std::fs::write(path, text).map_err(|e| DocsError::write(path, e))
    }

    pub fn sections(&self) -> &[MenuEntry] {
        self.sections.as_deref().unwrap_or(&[])
    }

    pub fn sections_mut(&mut self) -> &mut [MenuEntry] {
        self.sections.as_deref_mut().unwrap_or(&mut [])
    }

    // Finds the legacy URL of the page stored at `file` (root-relative).
    //
    // Paths are compared without the content extension. Sections are
    // searched too, depth first; the first matching entry that has a URL wins.
    pub fn find_old_doc_url(&self, file: &str, suffix: &str) -> Option<&str> {
        let wanted = file.strip_suffix(suffix).unwrap_or(file);

        fn search<'a>(entries: &'a [MenuEntry], wanted: &str, suffix: &str) -> Option<&'a str> {
            for entry in entries {
                if let Some(actual) = entry.actual_file() {
                    let actual = actual.strip_suffix(suffix).unwrap_or(actual);
                    if actual == wanted {
                        if let Some(url) = entry.old_doc_url() {
                            return Some(url);
                        }
                    }
                }
                if let Some(url) = search(entry.children(), wanted, suffix) {
                    return Some(url);
                }
            }
            None
        }

        search(self.sections(), wanted, suffix)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not #[derive(Deserialize)] with #[serde(flatten)]?
//    - flatten collects unknown keys, but "children" would then be written
//      back last, changing the file on every save
//    - Keeping a Null placeholder in the map remembers where the key was
//
// 2. What does preserve_order do?
//    - serde_json::Map is normally a BTreeMap (keys sorted)
//    - With the feature enabled it is an IndexMap (keys in insertion order)
//
// 3. Why &[MenuEntry] instead of &Vec<MenuEntry>?
//    - A slice is the more general borrow; callers can't push or pop, only
//      read (or edit in place through &mut [T])
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "version": 2,
  "sections": [
    {
      "title_tr": "Yönetim",
      "children": [
        {
          "title_tr": "Genel Bakış",
          "actual_file": "tr/admin/genel-bakis.mdx",
          "old_doc_url": "https://docs.example.com/admin",
          "order": 1
        },
        {
          "title_tr": "Roller",
          "children": [],
          "actual_file": "tr/admin/roller"
        }
      ],
      "icon": "gear"
    }
  ],
  "generated": "2024-01-01"
}"#;

    #[test]
    fn test_round_trip_preserves_document() {
        let index = MenuIndex::from_json(SAMPLE).unwrap();
        assert_eq!(index.to_json().unwrap(), SAMPLE);
    }

    #[test]
    fn test_typed_access() {
        let index = MenuIndex::from_json(SAMPLE).unwrap();
        let admin = &index.sections()[0];
        assert_eq!(admin.title_tr(), Some("Yönetim"));
        assert_eq!(admin.children().len(), 2);
        assert!(admin.children()[0].has_old_doc_url());
        assert!(!admin.children()[1].has_old_doc_url());
    }

    #[test]
    fn test_set_url_appends_key() {
        let mut index = MenuIndex::from_json(SAMPLE).unwrap();
        index.sections_mut()[0].children_mut()[1].set_old_doc_url("https://docs.example.com/roles");

        let json = index.to_json().unwrap();
        let roles_at = json.find("\"Roller\"").unwrap();
        let file_at = json.find("\"tr/admin/roller\"").unwrap();
        let url_at = json.find("https://docs.example.com/roles").unwrap();
        assert!(roles_at < file_at && file_at < url_at);
    }

    #[test]
    fn test_empty_string_url_is_absent() {
        let entry: MenuEntry = serde_json::from_str(r#"{"old_doc_url": ""}"#).unwrap();
        assert!(!entry.has_old_doc_url());
        let entry: MenuEntry = serde_json::from_str(r#"{"old_doc_url": null}"#).unwrap();
        assert!(!entry.has_old_doc_url());
    }

    #[test]
    fn test_find_old_doc_url_ignores_extension() {
        let index = MenuIndex::from_json(SAMPLE).unwrap();
        assert_eq!(
            index.find_old_doc_url("tr/admin/genel-bakis", ".mdx"),
            Some("https://docs.example.com/admin")
        );
        assert_eq!(
            index.find_old_doc_url("tr/admin/genel-bakis.mdx", ".mdx"),
            Some("https://docs.example.com/admin")
        );
        assert_eq!(index.find_old_doc_url("tr/admin/roller.mdx", ".mdx"), None);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(MenuIndex::from_json("[1, 2, 3]").is_err());
    }
}
