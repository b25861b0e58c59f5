//! Owned course-tree model built from parsed OLX files.

use std::collections::BTreeMap;

/// One element of the loaded course tree.
///
/// Pointer tags have already been resolved: a `<vertical url_name="v"/>`
/// pointer becomes the element parsed from `vertical/v.xml`, carrying the
/// pointer's `url_name` in its attribute map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseElement {
    /// Tag name (`course`, `chapter`, `sequential`, `vertical`, ...)
    pub tag: String,
    /// Attribute map, with pointer url_names merged in
    pub attributes: BTreeMap<String, String>,
    /// Child elements, in document order
    pub children: Vec<CourseElement>,
    /// Raw markup of content-bearing tags (html, problem), verbatim from the
    /// source file; `None` for structural tags
    pub content: Option<String>,
    /// Course-relative path of the file this element was parsed from
    pub source: String,
}

impl CourseElement {
    pub fn new(tag: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            content: None,
            source: source.into(),
        }
    }

    pub fn url_name(&self) -> Option<&str> {
        self.attributes.get("url_name").map(String::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.attributes.get("display_name").map(String::as_str)
    }

    /// Diagnostic form used in error messages:
    /// `<vertical: 'display name' (url_name)>`, with `(Unnamed)` standing in
    /// for a missing display name and `no url_name` for a missing url_name.
    pub fn describe(&self) -> String {
        let display = match self.display_name() {
            Some(name) => format!("'{}'", name),
            None => "(Unnamed)".to_string(),
        };
        let url_name = self.url_name().unwrap_or("no url_name");
        format!("<{}: {} ({})>", self.tag, display, url_name)
    }
}
