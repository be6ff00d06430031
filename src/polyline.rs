//! Flattening of path data into polylines.
//!
//! Flattening of Bézier curves is done using the
//! [Lyon](https://github.com/nical/lyon) library.

use std::mem;

use log::trace;
use lyon_geom::{point, CubicBezierSegment};

use crate::path::{PathData, Segment};
use crate::vector::Vertex;

/// Default maximum distance between a curve and its flattened polyline.
pub const DEFAULT_TOLERANCE: f64 = 0.15;

/// A polyline is a vector of vertices.
pub type Polyline = Vec<Vertex>;

#[derive(Debug, PartialEq)]
struct CurrentLine {
    /// The vertices of the line being built.
    line: Polyline,
}

/// Simple data structure that acts as a Polyline buffer.
impl CurrentLine {
    fn new() -> Self {
        Self {
            line: Polyline::new(),
        }
    }

    fn add(&mut self, v: Vertex) {
        self.line.push(v);
    }

    /// A polyline is only valid if it has more than 1 vertex.
    fn is_valid(&self) -> bool {
        self.line.len() > 1
    }

    fn last(&self) -> Option<Vertex> {
        self.line.last().copied()
    }

    /// Close the line by adding the first entry to the end.
    fn close(&mut self) {
        if let Some(&first) = self.line.first() {
            self.line.push(first);
        }
    }

    /// Replace the internal polyline with a new instance and return the
    /// previously stored polyline.
    fn finish(&mut self) -> Polyline {
        mem::take(&mut self.line)
    }
}

impl PathData {
    /// Convert the path into one polyline per subpath.
    ///
    /// Curves are approximated by line segments deviating at most
    /// `tolerance` from the curve. Closed subpaths end with their first
    /// vertex. Subpaths with fewer than two vertices are dropped.
    pub fn flatten(&self, tolerance: f64) -> Vec<Polyline> {
        trace!("PathData::flatten");
        let mut lines = Vec::new();
        let mut line = CurrentLine::new();
        // Start of the current subpath, where drawing resumes after a close.
        let mut start = Vertex::ZERO;

        for segment in self {
            match segment {
                Segment::MoveTo(v) => {
                    if line.is_valid() {
                        lines.push(line.finish());
                    }
                    line.finish();
                    line.add(v);
                    start = v;
                }
                Segment::LineTo(v) => {
                    if line.last().is_none() {
                        line.add(start);
                    }
                    line.add(v);
                }
                Segment::CurveTo(c1, c2, v) => {
                    let from = match line.last() {
                        Some(last) => last,
                        None => {
                            line.add(start);
                            start
                        }
                    };
                    let curve = CubicBezierSegment {
                        from: point(from.x, from.y),
                        ctrl1: point(c1.x, c1.y),
                        ctrl2: point(c2.x, c2.y),
                        to: point(v.x, v.y),
                    };
                    for p in curve.flattened(tolerance) {
                        line.add(Vertex::new(p.x, p.y));
                    }
                }
                Segment::Close => {
                    if line.is_valid() {
                        line.close();
                        lines.push(line.finish());
                    }
                    line.finish();
                }
            }
        }

        // Path flattening is done, add the remaining line if valid
        if line.is_valid() {
            lines.push(line.finish());
        }
        trace!("PathData::flatten: {} polylines", lines.len());
        lines
    }
}
