//! The attribute lookup interface through which documents hand raw
//! attribute strings to the parsers.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::path::PathData;
use crate::points::parse_points;
use crate::transform::Transform;
use crate::vector::Vertex;

/// Anything that can look up an attribute value by name, such as an XML
/// element.
pub trait AttributeSource {
    fn attr(&self, name: &str) -> Option<&str>;
}

impl AttributeSource for HashMap<String, String> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Parse the `d` attribute, `Ok(None)` if it is absent.
pub fn read_path<S: AttributeSource + ?Sized>(src: &S) -> Result<Option<PathData>> {
    src.attr("d").map(PathData::parse).transpose()
}

/// Parse the `transform` attribute, `Ok(None)` if it is absent.
pub fn read_transform<S: AttributeSource + ?Sized>(src: &S) -> Result<Option<Transform>> {
    src.attr("transform").map(Transform::parse).transpose()
}

/// Parse the `points` attribute, `Ok(None)` if it is absent.
pub fn read_points<S: AttributeSource + ?Sized>(src: &S) -> Result<Option<Vec<Vertex>>> {
    src.attr("points").map(parse_points).transpose()
}
