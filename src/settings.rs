//! The settings-document layer.
//!
//! Settings files are Jsonex documents with a conventional top-level
//! shape: a `content` tag naming the format, and an `objects` array of
//! attribute maps.
//!
//! ```text
//! content:TextLayoutSamplerSettings
//! objects:[
//!   {name:"First object", width:800},
//!   {name:"Second object", width:640}
//! ]
//! ```
//!
//! The `content` tag is validated before `objects` is trusted. A missing
//! or wrong tag is [`Error::UnrecognizedFormat`], a different condition
//! from syntax diagnostics: the text parsed fine but means something
//! else. Syntax diagnostics stay non-fatal and travel with the loaded
//! document as warnings.
//!
//! Attribute maps preserve insertion order, so loading a file and saving
//! it back keeps the user's attribute ordering.

use indexmap::IndexMap;

use crate::cursor::NodePointer;
use crate::error::{Error, ParseError, Result};
use crate::jsonex;
use crate::node::{GenericKind, NodeKind};
use crate::tree::TextTree;
use crate::writer::{JsonexWriter, TreeWriter};

/// The format tag expected in the `content` key.
pub const CONTENT_TAG: &str = "TextLayoutSamplerSettings";

/// A parsed settings file: an ordered attribute map per stored object.
#[derive(Clone, Debug, Default)]
pub struct SettingsDocument {
    /// One attribute map per entry of the `objects` array, in file order.
    pub objects: Vec<IndexMap<String, String>>,
    warnings: Vec<ParseError>,
}

impl SettingsDocument {
    /// An empty document with no objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a settings document from Jsonex text.
    ///
    /// Fails only on an absent or wrong `content` tag. Syntax problems in
    /// the text do not fail the load; they are retained as
    /// [`SettingsDocument::warnings`].
    pub fn from_jsonex(text: &str) -> Result<Self> {
        let (tree, warnings) = jsonex::parse(text);
        let root = NodePointer::new(&tree);
        match root.key_value("content") {
            Some(tag) if tag.eq_ignore_ascii_case(CONTENT_TAG) => {}
            found => {
                return Err(Error::UnrecognizedFormat {
                    expected: CONTENT_TAG,
                    found: found.map(str::to_string),
                })
            }
        }
        let mut objects = Vec::new();
        if let Some(list) = root.find("objects") {
            for entry in list.children() {
                if entry.node().generic() != GenericKind::Key {
                    continue;
                }
                let mut attributes = IndexMap::new();
                for attribute in entry.children() {
                    if attribute.node().generic() != GenericKind::Key {
                        continue;
                    }
                    if let Some(value) = attribute.single_subvalue() {
                        attributes.insert(attribute.text().to_string(), value.to_string());
                    }
                }
                objects.push(attributes);
            }
        }
        Ok(SettingsDocument { objects, warnings })
    }

    /// Diagnostics recorded while the document was parsed.
    #[must_use]
    pub fn warnings(&self) -> &[ParseError] {
        &self.warnings
    }

    /// Builds the document tree this settings state serializes to.
    pub fn to_tree(&self) -> Result<TextTree> {
        let mut tree = TextTree::new();
        tree.set_key_value(0, "content", CONTENT_TAG)?;
        let list = tree.append_child(0, NodeKind::Array, "objects")?;
        for attributes in &self.objects {
            let entry = tree.append_child(list, NodeKind::Object, "")?;
            for (name, value) in attributes {
                tree.set_key_value(entry, name, value)?;
            }
        }
        Ok(tree)
    }

    /// Serializes the document back to Jsonex text.
    pub fn to_jsonex(&self) -> Result<String> {
        let tree = self.to_tree()?;
        let mut writer = JsonexWriter::new();
        writer.write_nodes(&tree);
        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
content:TextLayoutSamplerSettings
objects:[
  {name:"First", width:800, height:600},
  {name:"Second", text:"A\tB"}
]
"#;

    #[test]
    fn loads_objects_in_order() {
        let doc = SettingsDocument::from_jsonex(SAMPLE).unwrap();
        assert!(doc.warnings().is_empty());
        assert_eq!(doc.objects.len(), 2);
        let keys: Vec<&str> = doc.objects[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "width", "height"]);
        assert_eq!(doc.objects[1]["text"], "A\tB");
    }

    #[test]
    fn wrong_content_tag_is_unrecognized() {
        let err = SettingsDocument::from_jsonex("content:SomethingElse\nobjects:[]").unwrap_err();
        match err {
            Error::UnrecognizedFormat { expected, found } => {
                assert_eq!(expected, CONTENT_TAG);
                assert_eq!(found.as_deref(), Some("SomethingElse"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_content_tag_is_unrecognized() {
        let err = SettingsDocument::from_jsonex("objects:[]").unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedFormat { found: None, .. }
        ));
    }

    #[test]
    fn content_tag_compares_case_insensitively() {
        let doc = SettingsDocument::from_jsonex("Content:textlayoutsamplersettings").unwrap();
        assert!(doc.objects.is_empty());
    }

    #[test]
    fn warnings_do_not_fail_the_load() {
        let doc =
            SettingsDocument::from_jsonex("content:TextLayoutSamplerSettings\nobjects:[{a:\"x]")
                .unwrap();
        assert!(!doc.warnings().is_empty());
    }

    #[test]
    fn round_trip_preserves_attribute_order() {
        let doc = SettingsDocument::from_jsonex(SAMPLE).unwrap();
        let text = doc.to_jsonex().unwrap();
        let again = SettingsDocument::from_jsonex(&text).unwrap();
        assert!(again.warnings().is_empty());
        assert_eq!(doc.objects, again.objects);
    }

    #[test]
    fn programmatic_documents_serialize() {
        let mut doc = SettingsDocument::new();
        let mut attributes = IndexMap::new();
        attributes.insert("family".to_string(), "Segoe UI".to_string());
        attributes.insert("size".to_string(), "12".to_string());
        doc.objects.push(attributes);

        let text = doc.to_jsonex().unwrap();
        assert!(text.contains("content:\"TextLayoutSamplerSettings\""));
        let again = SettingsDocument::from_jsonex(&text).unwrap();
        assert_eq!(again.objects[0]["family"], "Segoe UI");
        assert_eq!(again.objects[0]["size"], "12");
    }
}
