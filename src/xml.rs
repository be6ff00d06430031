//! A flat pull adapter over SVG markup.
//!
//! Elements are collected in document order together with their attributes.
//! Nesting is not tracked, so inherited state such as the transform of an
//! enclosing `<g>` is left to the caller.

use std::str;

use log::trace;
use quick_xml::events::Event;

use crate::error::{Error, Result};
use crate::path::PathData;
use crate::source::{read_path, read_transform, AttributeSource};
use crate::transform::Transform;

/// A start (or empty) tag and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

/// If an attribute occurs more than once, the first occurrence wins.
impl AttributeSource for Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn xml_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Xml(e.to_string())
}

/// Parse an SVG string, return all elements in document order.
pub fn elements(svg: &str) -> Result<Vec<Element>> {
    trace!("elements");

    let mut reader = quick_xml::Reader::from_str(svg);
    reader.trim_text(true);

    let mut elements = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = str::from_utf8(e.name()).map_err(xml_error)?.to_string();
                trace!("elements: Matched start of {}", name);
                let mut attributes = Vec::new();
                let mut attrs = e.attributes();
                attrs.with_checks(false);
                for attr in attrs {
                    let attr = attr.map_err(xml_error)?;
                    let key = str::from_utf8(attr.key).map_err(xml_error)?.to_string();
                    let value = attr.unescape_and_decode_value(&reader).map_err(xml_error)?;
                    attributes.push((key, value));
                }
                elements.push(Element { name, attributes });
            }
            Ok(Event::Eof) => {
                trace!("elements: EOF");
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }

        // If we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
        buf.clear();
    }
    trace!("elements: Return {} elements", elements.len());
    Ok(elements)
}

/// A `<path>` element with its geometry parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub id: Option<String>,
    pub path: PathData,
    /// The element's own `transform` attribute, identity if absent.
    pub transform: Transform,
}

impl PathElement {
    /// The path with the element's transform applied.
    pub fn transformed_path(&self) -> PathData {
        if self.transform.is_identity() {
            self.path.clone()
        } else {
            self.path.transform(&self.transform)
        }
    }
}

/// Parse an SVG string into its `<path>` elements.
///
/// A path without a `d` attribute yields an empty path. Any malformed `d`
/// or `transform` attribute fails the whole call.
pub fn paths(svg: &str) -> Result<Vec<PathElement>> {
    trace!("paths");
    elements(svg)?
        .iter()
        .filter(|element| element.name == "path")
        .map(|element| -> Result<PathElement> {
            Ok(PathElement {
                id: element.attr("id").map(str::to_string),
                path: read_path(element)?.unwrap_or_default(),
                transform: read_transform(element)?.unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vertex;

    #[test]
    fn test_elements() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 480 360">
                <g transform="translate(1 2)">
                    <polygon points="0,0 10,0 10,10" />
                </g>
            </svg>
        "#;
        let result = elements(input).unwrap();
        let names: Vec<_> = result.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["svg", "g", "polygon"]);
        assert_eq!(result[0].attr("viewBox"), Some("0 0 480 360"));
        assert_eq!(result[1].attr("transform"), Some("translate(1 2)"));
        assert_eq!(result[2].attr("points"), Some("0,0 10,0 10,10"));
        assert_eq!(result[2].attr("fill"), None);
    }

    #[test]
    fn test_elements_unescape() {
        let input = r#"<svg><path id="a&amp;b" d="M 20,30"/></svg>"#;
        let result = elements(input).unwrap();
        assert_eq!(result[1].attr("id"), Some("a&b"));
    }

    #[test]
    fn test_paths() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path id="first" d="M 10,100 40,70 h 10 m -20,40 10,-20" />
                <path d="M 20,30" transform="translate(5)" />
                <rect x="1" y="1" width="10" height="10" />
            </svg>
        "#;
        let result = paths(input).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id.as_deref(), Some("first"));
        assert_eq!(result[0].path.vertices().len(), 5);
        assert!(result[0].transform.is_identity());
        assert_eq!(result[1].id, None);
        assert_eq!(
            result[1].transformed_path().vertices(),
            &[Vertex::new(25.0, 30.0)]
        );
    }

    /// If multiple "d" attributes are found, simply use the first one.
    #[test]
    fn test_paths_duplicate_attr() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 20,30" d="M 10,100 40,70 h 10 m -20,40 10,-20"/>
            </svg>
        "#;
        let result = paths(input).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path.vertices(), &[Vertex::new(20.0, 30.0)]);
    }

    #[test]
    fn test_paths_without_d() {
        let result = paths(r#"<svg><path id="empty"/></svg>"#).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].path.is_empty());
    }

    #[test]
    fn test_paths_invalid_path_data() {
        let input = r#"<svg><path d="M 20,30 L 1"/></svg>"#;
        assert_eq!(
            paths(input),
            Err(Error::InvalidArgumentCount {
                command: 'L',
                offset: 8,
            })
        );
    }

    #[test]
    fn test_elements_malformed() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 20,30" d="M 10,100 40,70 h 10 m -20,40 10,-20"/>
            </baa>
        "#;
        assert!(matches!(elements(input), Err(Error::Xml(_))));
    }
}
