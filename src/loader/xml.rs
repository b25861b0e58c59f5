//! Course XML Loading
//!
//! Recursive descent over an OLX course tree. The entry point is
//! [`load_course`]: parse the root file, then follow pointer tags (an empty
//! tag whose only attribute is `url_name` stands for the file
//! `<tag>/<url_name>.xml`) down through the course → chapter → sequential →
//! vertical hierarchy, collecting every structural problem into the
//! [`ErrorStore`] along the way. Loading never aborts on a bad element; it
//! records the error and keeps whatever tree it can build.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{CourseError, ErrorStore};
use super::html::html_syntax_error;
use super::tree::CourseElement;

/// Structural rules for a known OLX tag.
#[derive(Debug, Clone, Copy)]
struct TagPolicy {
    /// Tags that may appear directly inside this one
    allowed_children: &'static [&'static str],
    /// Complete without children (self-contained leaves like video)
    can_be_empty: bool,
    /// Body is arbitrary markup, not course structure (html, problem)
    holds_content: bool,
}

fn tag_policy(tag: &str) -> Option<TagPolicy> {
    let policy = match tag {
        "course" => TagPolicy {
            allowed_children: &["chapter"],
            can_be_empty: false,
            holds_content: false,
        },
        "chapter" => TagPolicy {
            allowed_children: &["sequential"],
            can_be_empty: false,
            holds_content: false,
        },
        "sequential" => TagPolicy {
            allowed_children: &["vertical"],
            can_be_empty: false,
            holds_content: false,
        },
        "vertical" => TagPolicy {
            allowed_children: &["html", "problem", "video", "discussion", "lti"],
            can_be_empty: false,
            holds_content: false,
        },
        "html" | "problem" => TagPolicy {
            allowed_children: &[],
            can_be_empty: false,
            holds_content: true,
        },
        "video" | "discussion" | "lti" => TagPolicy {
            allowed_children: &[],
            can_be_empty: true,
            holds_content: false,
        },
        _ => return None,
    };
    Some(policy)
}

/// Longest snippet of stray text quoted in an UnexpectedContent message.
const SNIPPET_LEN: usize = 15;

fn snippet_of(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > SNIPPET_LEN {
        let head: String = trimmed.chars().take(SNIPPET_LEN).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}

/// Load a course tree rooted at `filename` inside `course_dir`.
///
/// Returns `None` only when no tree at all could be built (missing or
/// unparseable root file); everything else is reported through `errors`
/// while loading continues.
pub fn load_course(
    course_dir: impl AsRef<Path>,
    filename: &str,
    errors: &mut ErrorStore,
) -> Option<CourseElement> {
    let course_dir = course_dir.as_ref();
    let root_path = course_dir.join(filename);
    if !root_path.is_file() {
        errors.add(CourseError::CourseFileDoesNotExist {
            location: root_path.display().to_string(),
        });
        return None;
    }
    if filename != "course.xml" {
        errors.add(CourseError::BadCourseFileName {
            location: filename.to_string(),
        });
    }

    let mut loader = Loader {
        course_dir,
        errors,
        html_references: HashMap::new(),
        load_stack: Vec::new(),
    };
    loader.load_file(filename, "course", None)
}

struct Loader<'a> {
    course_dir: &'a Path,
    errors: &'a mut ErrorStore,
    /// html content file -> course-relative file that first referenced it
    html_references: HashMap<String, String>,
    /// Course-relative files currently being loaded, outermost first.
    /// Pointer resolution consults this to break reference cycles.
    load_stack: Vec<String>,
}

impl Loader<'_> {
    /// Parse a course-relative XML file whose root must be `expected_tag`.
    /// `inherited_url_name` is set when the file was reached via a pointer.
    fn load_file(
        &mut self,
        rel_path: &str,
        expected_tag: &str,
        inherited_url_name: Option<&str>,
    ) -> Option<CourseElement> {
        let text = match fs::read_to_string(self.course_dir.join(rel_path)) {
            Ok(text) => text,
            Err(err) => {
                self.errors.add(CourseError::InvalidXml {
                    location: rel_path.to_string(),
                    details: err.to_string(),
                });
                return None;
            }
        };
        let doc = match roxmltree::Document::parse(&text) {
            Ok(doc) => doc,
            Err(err) => {
                self.errors.add(CourseError::InvalidXml {
                    location: rel_path.to_string(),
                    details: err.to_string(),
                });
                return None;
            }
        };

        let root = doc.root_element();
        let found = root.tag_name().name();
        if found != expected_tag {
            self.errors.add(CourseError::TagMismatch {
                location: rel_path.to_string(),
                expected: expected_tag.to_string(),
                found: found.to_string(),
            });
            return None;
        }

        // A pointer target restating url_name is redundant; a pointer-shaped
        // root is a chained pointer instead and is handled in load_element.
        if inherited_url_name.is_some()
            && !is_pointer_shape(root)
            && root.has_attribute("url_name")
        {
            self.errors.add(CourseError::ExtraUrlName {
                location: rel_path.to_string(),
                tag_name: expected_tag.to_string(),
            });
        }

        self.load_stack.push(rel_path.to_string());
        let elem = self.load_element(root, &text, rel_path, inherited_url_name);
        self.load_stack.pop();
        Some(elem)
    }

    fn load_element(
        &mut self,
        node: roxmltree::Node,
        file_text: &str,
        source: &str,
        inherited_url_name: Option<&str>,
    ) -> CourseElement {
        let tag = node.tag_name().name().to_string();
        let mut elem = CourseElement::new(&tag, source);
        for attr in node.attributes() {
            elem.attributes
                .insert(attr.name().to_string(), attr.value().to_string());
        }

        let Some(policy) = tag_policy(&tag) else {
            // Parents only descend into known tags; unknown roots stop here.
            return elem;
        };

        // Pointer detection happens on the element's own attributes, before
        // any inherited url_name is merged in.
        if is_pointer_shape(node) {
            return self.resolve_pointer(elem);
        }

        if let Some(url_name) = inherited_url_name {
            // The pointer's url_name wins; a restated one was already
            // reported as ExtraUrlName.
            elem.attributes
                .insert("url_name".to_string(), url_name.to_string());
        }

        if policy.holds_content {
            elem.content = Some(file_text[node.range()].to_string());
            self.check_leaf_references(&elem, inherited_url_name.is_none());
            return elem;
        }

        let text = stray_text(node);
        if let Some(stray) = text {
            self.errors.add(CourseError::UnexpectedContent {
                location: source.to_string(),
                tag: elem.describe(),
                snippet: snippet_of(stray),
            });
        }

        let child_nodes: Vec<roxmltree::Node> =
            node.children().filter(|c| c.is_element()).collect();

        if child_nodes.is_empty() && text.is_none() && !policy.can_be_empty {
            if inherited_url_name.is_none()
                && node.has_attribute("url_name")
                && node.attributes().count() > 1
            {
                // Empty, has a url_name, but carries extra attributes: looks
                // like a pointer that would never resolve.
                self.errors.add(CourseError::InvalidPointer {
                    location: source.to_string(),
                    tag: elem.describe(),
                });
            } else {
                self.errors.add(CourseError::EmptyTag {
                    location: source.to_string(),
                    tag: elem.describe(),
                });
            }
            return elem;
        }

        if inherited_url_name.is_none() {
            self.check_possible_pointer(&elem);
        }

        for child in child_nodes {
            let child_tag = child.tag_name().name();
            if policy.allowed_children.contains(&child_tag) {
                let loaded = self.load_element(child, file_text, source, None);
                elem.children.push(loaded);
            } else {
                self.errors.add(CourseError::UnexpectedTag {
                    location: source.to_string(),
                    found: child_tag.to_string(),
                    parent: elem.describe(),
                });
            }
        }

        elem
    }

    /// Resolve a pointer-shaped element to the file it names.
    fn resolve_pointer(&mut self, elem: CourseElement) -> CourseElement {
        let url_name = elem
            .url_name()
            .expect("pointer shape requires url_name")
            .to_string();
        let target = format!("{}/{}.xml", elem.tag, url_name.replace(':', "/"));

        if target == elem.source {
            self.errors.add(CourseError::SelfPointer {
                location: elem.source.clone(),
                tag: elem.describe(),
            });
            return elem;
        }
        if self.load_stack.contains(&target) {
            self.errors.add(CourseError::CircularPointer {
                location: elem.source.clone(),
                tag: elem.describe(),
                target,
            });
            return elem;
        }
        if url_name.contains(':') {
            self.errors.add(CourseError::NonFlatUrlName {
                location: elem.source.clone(),
                tag: elem.describe(),
            });
        }
        if !self.course_dir.join(&target).is_file() {
            self.errors.add(CourseError::TargetDoesNotExist {
                location: elem.source.clone(),
                tag: elem.describe(),
                target,
            });
            return elem;
        }

        self.load_file(&target, &elem.tag, Some(&url_name))
            .unwrap_or(elem)
    }

    /// Reference checks for content-bearing leaves (html, problem).
    fn check_leaf_references(&mut self, elem: &CourseElement, own_url_name: bool) {
        if elem.tag == "html" {
            if elem.attributes.contains_key("filename") {
                self.check_html_file_reference(elem);
                return;
            }
            if own_url_name
                && let Some(url_name) = elem.url_name()
                && !url_name.contains(':')
            {
                let target = format!("html/{}.html", url_name);
                if self.course_dir.join(&target).is_file() {
                    self.errors.add(CourseError::PossibleHtmlPointer {
                        location: elem.source.clone(),
                        tag: elem.describe(),
                        target,
                    });
                }
            }
            return;
        }
        if own_url_name {
            self.check_possible_pointer(elem);
        }
    }

    /// Resolve and vet an html tag's `filename` reference.
    fn check_html_file_reference(&mut self, elem: &CourseElement) {
        let filename = &elem.attributes["filename"];
        let target = format!("html/{}.html", filename.replace(':', "/"));

        if filename.contains(':') {
            self.errors.add(CourseError::NonFlatFilename {
                location: elem.source.clone(),
                tag: elem.describe(),
                filename: target.clone(),
            });
        }
        if !self.course_dir.join(&target).is_file() {
            self.errors.add(CourseError::TargetDoesNotExist {
                location: elem.source.clone(),
                tag: elem.describe(),
                target,
            });
            return;
        }

        match self.html_references.get(&target) {
            Some(first_reference) => {
                self.errors.add(CourseError::DuplicateHtmlName {
                    location: elem.source.clone(),
                    filename: target,
                    other_location: first_reference.clone(),
                });
            }
            None => {
                self.html_references
                    .insert(target.clone(), elem.source.clone());
                // Syntax-check each content file once, on first reference.
                if let Ok(content) = fs::read_to_string(self.course_dir.join(&target))
                    && let Some(details) = html_syntax_error(&content)
                {
                    self.errors.add(CourseError::InvalidHtml {
                        location: target,
                        details,
                    });
                }
            }
        }
    }

    /// Flag a non-pointer tag whose plausible pointer target exists.
    fn check_possible_pointer(&mut self, elem: &CourseElement) {
        let Some(url_name) = elem.url_name() else {
            return;
        };
        if url_name.contains(':') {
            return;
        }
        let target = format!("{}/{}.xml", elem.tag, url_name);
        if self.course_dir.join(&target).is_file() {
            self.errors.add(CourseError::PossiblePointer {
                location: elem.source.clone(),
                tag: elem.describe(),
                target,
            });
        }
    }
}

/// An empty element whose only attribute is `url_name`.
fn is_pointer_shape(node: roxmltree::Node) -> bool {
    node.has_attribute("url_name")
        && node.attributes().count() == 1
        && !node.children().any(|c| c.is_element())
        && stray_text(node).is_none()
}

/// First non-whitespace text directly inside the element.
fn stray_text<'a>(node: roxmltree::Node<'a, '_>) -> Option<&'a str> {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .find(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncation() {
        assert_eq!(snippet_of("  short  "), "short");
        assert_eq!(snippet_of("Here is some content in a tag"), "Here is some co...");
    }

    #[test]
    fn test_tag_policy_table() {
        assert!(tag_policy("course").is_some());
        assert!(tag_policy("spaceship").is_none());
        assert!(tag_policy("video").unwrap().can_be_empty);
        assert!(tag_policy("html").unwrap().holds_content);
        assert!(tag_policy("vertical").unwrap().allowed_children.contains(&"problem"));
    }
}
