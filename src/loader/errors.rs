//! Course Loading Error Taxonomy
//!
//! A closed set of tagged variants, one per structural violation kind, each
//! carrying a course-relative location. Errors are collected rather than
//! raised: loading continues past every problem so one pass reports the
//! whole course. Locations are course-relative paths with forward slashes.

use thiserror::Error;

/// Report level of a collected error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLevel {
    /// Style or heuristic finding; the course still loads
    Warning,
    /// Structural breakage
    Error,
}

/// Violation kind, used for querying a store without matching on fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CourseFileDoesNotExist,
    BadCourseFileName,
    InvalidXml,
    TagMismatch,
    SelfPointer,
    CircularPointer,
    TargetDoesNotExist,
    NonFlatUrlName,
    NonFlatFilename,
    InvalidPointer,
    UnexpectedTag,
    ExtraUrlName,
    UnexpectedContent,
    EmptyTag,
    PossiblePointer,
    PossibleHtmlPointer,
    DuplicateHtmlName,
    InvalidHtml,
}

/// One structural problem found while loading a course tree.
///
/// The `tag` fields hold the diagnostic form of the offending element,
/// `<tag: 'display name' (url_name)>`, produced by
/// [`CourseElement::describe`](crate::loader::tree::CourseElement::describe).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    #[error("The file '{location}' does not exist.")]
    CourseFileDoesNotExist { location: String },

    #[error("The course file, {location}, is not named course.xml")]
    BadCourseFileName { location: String },

    #[error("{details}")]
    InvalidXml { location: String, details: String },

    #[error("A file is of type <{expected}> but opens with a <{found}> tag")]
    TagMismatch {
        location: String,
        expected: String,
        found: String,
    },

    #[error("The {tag} tag appears to be pointing to itself")]
    SelfPointer { location: String, tag: String },

    #[error("The {tag} tag points to the file {target}, which is already being loaded")]
    CircularPointer {
        location: String,
        tag: String,
        target: String,
    },

    #[error("The {tag} tag points to the file {target} that does not exist")]
    TargetDoesNotExist {
        location: String,
        tag: String,
        target: String,
    },

    #[error("The {tag} tag uses obsolete colon notation in the url_name to point to a subdirectory")]
    NonFlatUrlName { location: String, tag: String },

    #[error("The {tag} tag uses obsolete colon notation to point to a subdirectory for filename {filename}")]
    NonFlatFilename {
        location: String,
        tag: String,
        filename: String,
    },

    #[error("The {tag} tag looks like it is an invalid pointer tag")]
    InvalidPointer { location: String, tag: String },

    #[error("A <{found}> tag was unexpectedly found inside the {parent} tag")]
    UnexpectedTag {
        location: String,
        found: String,
        parent: String,
    },

    #[error("The opening <{tag_name}> tag shouldn't have a url_name attribute")]
    ExtraUrlName { location: String, tag_name: String },

    #[error("The {tag} tag should not contain any text ({snippet})")]
    UnexpectedContent {
        location: String,
        tag: String,
        snippet: String,
    },

    #[error("The {tag} tag is unexpectedly empty")]
    EmptyTag { location: String, tag: String },

    #[error("The {tag} tag is not a pointer, but a file that it could point to exists ({target})")]
    PossiblePointer {
        location: String,
        tag: String,
        target: String,
    },

    #[error("The {tag} tag is not a pointer, but a file that it could point to exists ({target})")]
    PossibleHtmlPointer {
        location: String,
        tag: String,
        target: String,
    },

    #[error("Two html tags refer to the same HTML file (using the 'filename' attribute): {filename} is referenced in {location} and {other_location}")]
    DuplicateHtmlName {
        location: String,
        filename: String,
        other_location: String,
    },

    #[error("{details}")]
    InvalidHtml { location: String, details: String },
}

impl CourseError {
    /// Course-relative path of the file the error was found in.
    pub fn location(&self) -> &str {
        match self {
            CourseError::CourseFileDoesNotExist { location }
            | CourseError::BadCourseFileName { location }
            | CourseError::InvalidXml { location, .. }
            | CourseError::TagMismatch { location, .. }
            | CourseError::SelfPointer { location, .. }
            | CourseError::CircularPointer { location, .. }
            | CourseError::TargetDoesNotExist { location, .. }
            | CourseError::NonFlatUrlName { location, .. }
            | CourseError::NonFlatFilename { location, .. }
            | CourseError::InvalidPointer { location, .. }
            | CourseError::UnexpectedTag { location, .. }
            | CourseError::ExtraUrlName { location, .. }
            | CourseError::UnexpectedContent { location, .. }
            | CourseError::EmptyTag { location, .. }
            | CourseError::PossiblePointer { location, .. }
            | CourseError::PossibleHtmlPointer { location, .. }
            | CourseError::DuplicateHtmlName { location, .. }
            | CourseError::InvalidHtml { location, .. } => location,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CourseError::CourseFileDoesNotExist { .. } => ErrorKind::CourseFileDoesNotExist,
            CourseError::BadCourseFileName { .. } => ErrorKind::BadCourseFileName,
            CourseError::InvalidXml { .. } => ErrorKind::InvalidXml,
            CourseError::TagMismatch { .. } => ErrorKind::TagMismatch,
            CourseError::SelfPointer { .. } => ErrorKind::SelfPointer,
            CourseError::CircularPointer { .. } => ErrorKind::CircularPointer,
            CourseError::TargetDoesNotExist { .. } => ErrorKind::TargetDoesNotExist,
            CourseError::NonFlatUrlName { .. } => ErrorKind::NonFlatUrlName,
            CourseError::NonFlatFilename { .. } => ErrorKind::NonFlatFilename,
            CourseError::InvalidPointer { .. } => ErrorKind::InvalidPointer,
            CourseError::UnexpectedTag { .. } => ErrorKind::UnexpectedTag,
            CourseError::ExtraUrlName { .. } => ErrorKind::ExtraUrlName,
            CourseError::UnexpectedContent { .. } => ErrorKind::UnexpectedContent,
            CourseError::EmptyTag { .. } => ErrorKind::EmptyTag,
            CourseError::PossiblePointer { .. } => ErrorKind::PossiblePointer,
            CourseError::PossibleHtmlPointer { .. } => ErrorKind::PossibleHtmlPointer,
            CourseError::DuplicateHtmlName { .. } => ErrorKind::DuplicateHtmlName,
            CourseError::InvalidHtml { .. } => ErrorKind::InvalidHtml,
        }
    }

    /// Fixed report level per violation kind.
    pub fn level(&self) -> ErrorLevel {
        match self.kind() {
            ErrorKind::CourseFileDoesNotExist
            | ErrorKind::InvalidXml
            | ErrorKind::TagMismatch
            | ErrorKind::SelfPointer
            | ErrorKind::CircularPointer
            | ErrorKind::TargetDoesNotExist
            | ErrorKind::InvalidPointer
            | ErrorKind::UnexpectedTag
            | ErrorKind::InvalidHtml => ErrorLevel::Error,
            ErrorKind::BadCourseFileName
            | ErrorKind::NonFlatUrlName
            | ErrorKind::NonFlatFilename
            | ErrorKind::ExtraUrlName
            | ErrorKind::UnexpectedContent
            | ErrorKind::EmptyTag
            | ErrorKind::PossiblePointer
            | ErrorKind::PossibleHtmlPointer
            | ErrorKind::DuplicateHtmlName => ErrorLevel::Warning,
        }
    }
}

/// Collector for course loading errors, kept in encounter order.
#[derive(Debug, Default)]
pub struct ErrorStore {
    errors: Vec<CourseError>,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: CourseError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[CourseError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether any collected error is at the `Error` level.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.level() == ErrorLevel::Error)
    }

    /// Number of collected errors of the given kind.
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }

    /// Remove and return the first error matching kind, location, and
    /// rendered message. Tests drain a store with this and then assert it is
    /// empty, so nothing unexplained slips through.
    pub fn take_matching(
        &mut self,
        kind: ErrorKind,
        location: &str,
        message: &str,
    ) -> Option<CourseError> {
        let index = self.errors.iter().position(|e| {
            e.kind() == kind && e.location() == location && e.to_string() == message
        })?;
        Some(self.errors.remove(index))
    }

    /// Remove and return the first error of the given kind at the given
    /// location, regardless of message. Used where the message embeds
    /// third-party parser detail.
    pub fn take_kind_at(&mut self, kind: ErrorKind, location: &str) -> Option<CourseError> {
        let index = self
            .errors
            .iter()
            .position(|e| e.kind() == kind && e.location() == location)?;
        Some(self.errors.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_shapes() {
        let err = CourseError::TargetDoesNotExist {
            location: "sequential/one.xml".to_string(),
            tag: "<vertical: (Unnamed) (gone)>".to_string(),
            target: "vertical/gone.xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The <vertical: (Unnamed) (gone)> tag points to the file vertical/gone.xml that does not exist"
        );

        let err = CourseError::TagMismatch {
            location: "vertical/v.xml".to_string(),
            expected: "vertical".to_string(),
            found: "chapter".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A file is of type <vertical> but opens with a <chapter> tag"
        );
    }

    #[test]
    fn test_levels() {
        let warning = CourseError::BadCourseFileName {
            location: "coursefile.xml".to_string(),
        };
        assert_eq!(warning.level(), ErrorLevel::Warning);

        let error = CourseError::CourseFileDoesNotExist {
            location: "testcourses/nocourse.xml".to_string(),
        };
        assert_eq!(error.level(), ErrorLevel::Error);

        let cycle = CourseError::CircularPointer {
            location: "chapter/b.xml".to_string(),
            tag: "<chapter: (Unnamed) (a)>".to_string(),
            target: "chapter/a.xml".to_string(),
        };
        assert_eq!(cycle.level(), ErrorLevel::Error);
    }

    #[test]
    fn test_store_queries() {
        let mut store = ErrorStore::new();
        assert!(store.is_empty());
        assert!(!store.has_errors());

        store.add(CourseError::EmptyTag {
            location: "vertical/v.xml".to_string(),
            tag: "<vertical: (Unnamed) (no url_name)>".to_string(),
        });
        store.add(CourseError::InvalidXml {
            location: "course.xml".to_string(),
            details: "expected '>' at 1:9".to_string(),
        });

        assert_eq!(store.len(), 2);
        assert_eq!(store.count_of(ErrorKind::EmptyTag), 1);
        assert!(store.has_errors());
    }

    #[test]
    fn test_take_matching_drains_store() {
        let mut store = ErrorStore::new();
        store.add(CourseError::SelfPointer {
            location: "vertical/v8.xml".to_string(),
            tag: "<vertical: (Unnamed) (v8)>".to_string(),
        });

        let taken = store.take_matching(
            ErrorKind::SelfPointer,
            "vertical/v8.xml",
            "The <vertical: (Unnamed) (v8)> tag appears to be pointing to itself",
        );
        assert!(taken.is_some());
        assert!(store.is_empty());

        let missing = store.take_matching(ErrorKind::SelfPointer, "vertical/v8.xml", "nope");
        assert!(missing.is_none());
    }
}
