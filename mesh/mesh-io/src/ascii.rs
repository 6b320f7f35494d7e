//! ASCII STL decoding.
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Hand-edited and partially corrupted exports are common, so the decoder
//! skips a facet it cannot read instead of failing the whole file.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::LazyLock;

use mesh_types::{Point3, Triangle};
use regex::Regex;
use tracing::debug;

use crate::error::IoResult;

/// Lines spanned by one well-formed facet, `facet` through `endfacet`.
const FACET_LINES: usize = 7;

/// Offsets of the three `vertex` lines relative to the `facet` line.
const VERTEX_OFFSETS: [usize; 3] = [2, 3, 4];

/// Standard or scientific-notation decimal number.
#[allow(clippy::expect_used)] // Literal pattern, checked by the tests below
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?").expect("number pattern is valid")
});

/// Lazy decoder over the facets of an ASCII STL stream.
///
/// Scans for lines starting with `facet` (case-insensitive, after leading
/// whitespace) and reads the vertex lines two, three and four lines below
/// it. A facet whose vertex lines hold fewer than three numbers, or that
/// runs past the end of the input, is skipped and scanning resumes on the
/// following line. At most one facet's worth of lines is buffered.
///
/// Only read failures are yielded as errors. Invalid UTF-8 is decoded
/// lossily rather than rejected.
///
/// # Example
///
/// ```
/// use mesh_io::AsciiTriangles;
///
/// let text = b"solid t
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 1 0 0
///       vertex 0 1 0
///     endloop
///   endfacet
/// endsolid t
/// ";
///
/// let mut reader = AsciiTriangles::new(&text[..]);
/// let tri = reader.next().unwrap().unwrap();
/// assert_eq!(tri.v1.x, 1.0);
/// assert!(reader.next().is_none());
/// assert_eq!(reader.skipped_facets(), 0);
/// ```
#[derive(Debug)]
pub struct AsciiTriangles<R> {
    reader: R,
    window: VecDeque<String>,
    /// 1-based line number of the first line in `window`.
    line: usize,
    eof: bool,
    failed: bool,
    skipped: usize,
}

impl<R: BufRead> AsciiTriangles<R> {
    /// Create a decoder reading lines from `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            window: VecDeque::with_capacity(FACET_LINES),
            line: 1,
            eof: false,
            failed: false,
            skipped: 0,
        }
    }

    /// Number of facets discarded as malformed so far.
    #[must_use]
    pub const fn skipped_facets(&self) -> usize {
        self.skipped
    }

    /// Buffer lines until the window holds `n` of them or input ends.
    fn fill(&mut self, n: usize) -> IoResult<()> {
        let mut buf = Vec::new();
        while self.window.len() < n && !self.eof {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                self.eof = true;
            } else {
                self.window
                    .push_back(String::from_utf8_lossy(&buf).into_owned());
            }
        }
        Ok(())
    }

    fn consume(&mut self, n: usize) {
        let n = n.min(self.window.len());
        self.window.drain(..n);
        self.line += n;
    }

    fn next_triangle(&mut self) -> IoResult<Option<Triangle>> {
        loop {
            self.fill(1)?;
            let Some(first) = self.window.front() else {
                return Ok(None);
            };

            if !is_facet_start(first) {
                self.consume(1);
                continue;
            }

            self.fill(FACET_LINES)?;
            if let Some(triangle) = parse_facet(&self.window) {
                self.consume(FACET_LINES);
                return Ok(Some(triangle));
            }

            debug!(line = self.line, "Skipping malformed facet");
            self.skipped += 1;
            self.consume(1);
        }
    }
}

impl<R: BufRead> Iterator for AsciiTriangles<R> {
    type Item = IoResult<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_triangle() {
            Ok(triangle) => triangle.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Whether a line opens a facet.
fn is_facet_start(line: &str) -> bool {
    line.trim_start()
        .get(..5)
        .is_some_and(|word| word.eq_ignore_ascii_case("facet"))
}

/// Read the three vertices of the facet starting at `lines[0]`.
fn parse_facet(lines: &VecDeque<String>) -> Option<Triangle> {
    let [a, b, c] = VERTEX_OFFSETS;
    Some(Triangle::new(
        parse_vertex(lines.get(a)?)?,
        parse_vertex(lines.get(b)?)?,
        parse_vertex(lines.get(c)?)?,
    ))
}

/// Take the first three numeric tokens of a line as x, y, z.
fn parse_vertex(line: &str) -> Option<Point3<f64>> {
    let mut numbers = NUMBER
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<f64>().ok());
    Some(Point3::new(numbers.next()?, numbers.next()?, numbers.next()?))
}
