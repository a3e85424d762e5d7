// src/parser/page.rs
// =============================================================================
// The data that comes out of a parsed page.
//
// - PageRecord: title, paragraphs and form targets; exported as one JSON file
// - ExternalResources: script/stylesheet/image/media references, only logged
// =============================================================================

use serde::Serialize;

// One successfully fetched and parsed page
//
// The JSON field names are part of the export format and must not change.
// The page URL is carried alongside but not written into the document; it
// is already encoded in the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    #[serde(skip)]
    pub url: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Paragraphs")]
    pub paragraphs: Vec<String>,

    #[serde(rename = "Form Links")]
    pub form_links: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Script,
    Stylesheet,
    Image,
    /// <source>, <video> and <audio>
    Media,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Script => "JavaScript",
            ResourceKind::Stylesheet => "CSS",
            ResourceKind::Image => "Images",
            ResourceKind::Media => "Other",
        }
    }
}

// Raw attribute values (not resolved) grouped by category, document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalResources {
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    pub images: Vec<String>,
    pub media: Vec<String>,
}

impl ExternalResources {
    pub fn get(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Script => &self.scripts,
            ResourceKind::Stylesheet => &self.stylesheets,
            ResourceKind::Image => &self.images,
            ResourceKind::Media => &self.media,
        }
    }

    // Non-empty categories only, in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &[String])> {
        [
            ResourceKind::Script,
            ResourceKind::Stylesheet,
            ResourceKind::Image,
            ResourceKind::Media,
        ]
        .into_iter()
        .map(move |kind| (kind, self.get(kind)))
        .filter(|(_, urls)| !urls.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
