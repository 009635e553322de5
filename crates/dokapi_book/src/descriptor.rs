//! Typed book descriptor.
//!
//! Built from the JSON document once it has passed the descriptor schema,
//! so every required field is known to be present with the right type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The contents of `dokapi.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDescriptor {
    /// Book title
    pub name: String,
    /// Project identifier used to resolve project variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_project_variables: Option<bool>,
    /// Landing page
    pub main: MainEntry,
    /// Opaque values substituted into pages
    pub variables: Map<String, Value>,
    /// Site template, relative to the book root
    pub site_template: String,
    /// Page template, relative to the book root
    pub page_template: String,
    /// Prefix headings with section numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<bool>,
    /// Label of the "previous page" link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_link: Option<String>,
    /// Label of the "next page" link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    /// Open external links in a new tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_links_to_blank: Option<bool>,
    /// Assets directory, relative to the book root
    pub assets: String,
    /// Table of contents
    pub index: Vec<IndexEntry>,
}

impl BookDescriptor {
    pub fn numbering(&self) -> bool {
        self.numbering.unwrap_or(false)
    }

    pub fn skips_project_variables(&self) -> bool {
        self.skip_project_variables.unwrap_or(false)
    }

    pub fn opens_external_links_in_blank(&self) -> bool {
        self.external_links_to_blank.unwrap_or(false)
    }

    /// Index entries that are not hidden.
    pub fn visible_entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.index.iter().filter(|entry| !entry.is_hidden())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainEntry {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A top-level table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    /// Stable key, kept when the entry is renamed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildEntry>>,
}

impl IndexEntry {
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    pub fn children(&self) -> &[ChildEntry] {
        self.children.as_deref().unwrap_or_default()
    }

    /// A section groups children instead of, or in addition to, its own page.
    pub fn is_section(&self) -> bool {
        self.children.is_some()
    }
}

/// A second-level entry. Children never nest further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let descriptor: BookDescriptor = serde_json::from_value(json!({
            "name": "Manual",
            "skipProjectVariables": true,
            "main": { "content": "main.md" },
            "variables": { "version": "1.2" },
            "siteTemplate": "site.html",
            "pageTemplate": "page.html",
            "externalLinksToBlank": true,
            "assets": "assets",
            "index": [
                { "name": "Intro", "content": "intro.md", "hidden": true },
                { "name": "Guide", "key": "guide", "children": [
                    { "name": "Setup", "content": "guide/setup.md" }
                ]}
            ]
        }))
        .unwrap();

        assert!(descriptor.skips_project_variables());
        assert!(descriptor.opens_external_links_in_blank());
        assert!(!descriptor.numbering());
        assert_eq!(descriptor.variables["version"], json!("1.2"));
        assert_eq!(descriptor.visible_entries().count(), 1);

        let guide = &descriptor.index[1];
        assert!(guide.is_section());
        assert_eq!(guide.children()[0].content, "guide/setup.md");
        assert!(descriptor.index[0].children().is_empty());
    }
}
