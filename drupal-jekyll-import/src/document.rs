//! Front matter plus body: the text written for each record.

use drupal_jekyll_core::ContentRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to serialize front matter: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// A front-matter value. Drupal gives us only text and integers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Str(String),
    Int(i64),
}

/// Ordered front-matter mapping. Keys keep insertion order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(&'static str, MetaValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text value. Absent and empty values are left out entirely.
    pub fn push_str(&mut self, key: &'static str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => self.entries.push((key, MetaValue::Str(v.to_string()))),
            _ => {}
        }
    }

    /// Add an integer value. Integers are always kept, zero included.
    pub fn push_int(&mut self, key: &'static str, value: i64) {
        self.entries.push((key, MetaValue::Int(value)));
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Serialize as a YAML mapping (no document markers).
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        Ok(serde_yml::to_string(self)?)
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The complete output for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

impl OutputDocument {
    /// Build the document for a content record.
    ///
    /// Key order is fixed: layout, title, menu_title, author, nid, mlid,
    /// plid, created, excerpt.
    pub fn from_record(record: &ContentRecord) -> Self {
        let mut fm = FrontMatter::new();
        fm.push_str("layout", Some("post"));
        fm.push_str("title", Some(record.title.trim()));
        fm.push_str("menu_title", record.menu_title.as_deref().map(str::trim));
        fm.push_str("author", record.author.as_deref());
        fm.push_int("nid", record.nid);
        fm.push_int("mlid", record.mlid);
        fm.push_int("plid", record.plid);
        fm.push_int("created", record.created);
        fm.push_str("excerpt", record.summary.as_deref());

        Self {
            front_matter: fm,
            body: record.body.clone().unwrap_or_default(),
        }
    }

    /// Render `---`, the front matter, `---`, then the body.
    ///
    /// The output always ends with a newline; a body that already ends in
    /// one does not get a second.
    pub fn render(&self) -> Result<String, DocumentError> {
        let yaml = self.front_matter.to_yaml()?;

        let mut out = String::with_capacity(yaml.len() + self.body.len() + 10);
        out.push_str("---\n");
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("---\n");
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}
