//! Embedded HTML Syntax Checking
//!
//! OLX courses carry HTML content files referenced from `html` tags. This is
//! a tag-balance scan over quick-xml's streaming events, not a full HTML
//! parse: void elements never go on the stack, and the first stray or
//! mismatched end tag is reported with its line and column.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn line_col(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let prefix = &content[..offset];
    let line = prefix.matches('\n').count() + 1;
    let column = offset - prefix.rfind('\n').map_or(0, |i| i + 1) + 1;
    (line, column)
}

/// Scan an HTML fragment and report its first syntax problem, if any.
pub fn html_syntax_error(content: &str) -> Option<String> {
    let mut reader = Reader::from_str(content);
    // End-tag matching is done here, with HTML void-element semantics.
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut stack: Vec<String> = Vec::new();

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if !is_void(&name) {
                    stack.push(name);
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if is_void(&name) {
                    // Stray closers like </br> are tolerated.
                    continue;
                }
                match stack.pop() {
                    None => {
                        let (line, column) = line_col(content, position);
                        return Some(format!(
                            "Unexpected end tag : {}, line {}, column {}",
                            name, line, column
                        ));
                    }
                    Some(open) if open != name => {
                        let (line, column) = line_col(content, position);
                        return Some(format!(
                            "End tag : {} does not match open tag : {}, line {}, column {}",
                            name, open, line, column
                        ));
                    }
                    Some(_) => {}
                }
            }
            Ok(Event::Empty(_)) => {}
            Ok(Event::Eof) => {
                if let Some(open) = stack.pop() {
                    return Some(format!("Tag not closed : {}", open));
                }
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                let (line, column) = line_col(content, reader.error_position() as usize);
                return Some(format!("{}, line {}, column {}", e, line, column));
            }
        }
    }
}
