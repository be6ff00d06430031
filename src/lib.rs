//! Parse the geometry mini-languages of SVG attributes.
//!
//! * Path data (`d`) becomes [`PathData`]: absolute move, line, cubic curve
//!   and close commands. Relative coordinates are resolved, `H`/`V` become
//!   lines, quadratic curves and elliptical arcs become cubic curves.
//! * Transform lists (`transform`) become a single affine [`Transform`].
//! * Point lists (`points`) become a list of [`Vertex`] values.
//!
//! Parse errors carry the byte offset of the offending input.
//!
//! ```
//! use svg2geometry::{PathData, Transform, Vector};
//!
//! let path: PathData = "M0,0 h10 v10 z".parse().unwrap();
//! assert_eq!(path.to_string(), "M0,0L10,0L10,10z");
//!
//! let t: Transform = "translate(10,20) scale(2)".parse().unwrap();
//! assert_eq!(t.apply_point(Vector::new(1.0, 0.0)), Vector::new(12.0, 20.0));
//! ```
//!
//! Paths can be flattened into polylines with [`PathData::flatten`], which
//! uses the [Lyon](https://github.com/nical/lyon) library.
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]

mod arc;
mod error;
mod path;
mod points;
mod polyline;
mod source;
pub mod tokenizer;
mod transform;
mod vector;
pub mod xml;

pub use crate::arc::append_arc;
pub use crate::error::{Error, Result};
pub use crate::path::{PathCommand, PathData, Segment, Segments};
pub use crate::points::{parse_points, parse_view_box, ViewBox};
pub use crate::polyline::{Polyline, DEFAULT_TOLERANCE};
pub use crate::source::{read_path, read_points, read_transform, AttributeSource};
pub use crate::transform::Transform;
pub use crate::vector::{Vector, Vertex};

/// Parse an SVG string into a list of polylines, one per subpath of every
/// `<path>` element, with each element's `transform` applied.
pub fn parse(svg: &str, tolerance: f64) -> Result<Vec<(Option<String>, Polyline)>> {
    log::trace!("parse");

    let mut polylines = Vec::new();
    for element in xml::paths(svg)? {
        let path = element.transformed_path();
        for line in path.flatten(tolerance) {
            polylines.push((element.id.clone(), line));
        }
    }

    log::trace!("parse: This results in {} polylines", polylines.len());
    Ok(polylines)
}
