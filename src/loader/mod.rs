//! OLX Course Tree Loading
//!
//! Loads an edX OLX course directory tree starting from a named root file,
//! resolving pointer tags into their per-type subdirectory files, and
//! collecting structural errors into an [`ErrorStore`] instead of failing on
//! the first problem. Parsing is synchronous CPU-bound work, kept separate
//! from the async report pipeline.

pub mod errors;
pub mod html;
pub mod tree;
pub mod xml;

pub use errors::{CourseError, ErrorKind, ErrorLevel, ErrorStore};
pub use tree::CourseElement;
pub use xml::load_course;
