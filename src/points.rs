use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tokenizer::scan_numbers;
use crate::vector::Vertex;

/// Parse the `points` attribute of a `<polyline>` or `<polygon>`.
///
/// Numbers are separated by whitespace and/or commas and are paired up in
/// order.
pub fn parse_points(s: &str) -> Result<Vec<Vertex>> {
    trace!("parse_points");
    let numbers = scan_numbers(s)?;
    if numbers.len() % 2 != 0 {
        return Err(Error::OddCoordinateCount(numbers.len()));
    }
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Vertex::new(pair[0], pair[1]))
        .collect())
}

/// The `viewBox` attribute of an `<svg>` element.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Parse a `viewBox` value: exactly four numbers, width and height not
/// negative.
pub fn parse_view_box(s: &str) -> Result<ViewBox> {
    trace!("parse_view_box");
    let numbers = scan_numbers(s)?;
    match numbers[..] {
        [x, y, width, height] if width >= 0.0 && height >= 0.0 => Ok(ViewBox {
            x,
            y,
            width,
            height,
        }),
        _ => Err(Error::InvalidViewBox),
    }
}
