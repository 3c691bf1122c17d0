//! Flat text layout for raw grid samples.
//!
//! ```text
//! n:
//! <n>
//! m:
//! <m>
//! x:
//! <x[0]>
//! ...          n lines
//! y:
//! <y[0]>
//! ...          m lines
//! z:
//! <z value>
//! ...          n * m lines, y-major: value k = i * n + j is z[[i, j]]
//! ```
//!
//! Label lines are not checked. Trailing blank lines are ignored.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use ndarray::Array2;

use crate::CacheError;

/// Raw samples as stored on disk, `z[[i, j]]` at `(x[j], y[i])`.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Array2<f64>,
}

/// Line cursor that reports 1-based line numbers.
struct Lines<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        Self { lines, pos: 0 }
    }

    fn next(&mut self) -> Result<(usize, &'a str), CacheError> {
        let line = self.pos + 1;
        let text = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or_else(|| malformed(line, "unexpected end of file".to_string()))?;
        self.pos += 1;
        Ok((line, text.trim()))
    }

    fn label(&mut self) -> Result<(), CacheError> {
        self.next().map(|_| ())
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T, CacheError> {
        let (line, text) = self.next()?;
        text.parse()
            .map_err(|_| malformed(line, format!("expected {what}, found {text:?}")))
    }

    fn values(&mut self, what: &str, count: usize) -> Result<Vec<f64>, CacheError> {
        (0..count).map(|_| self.parse::<f64>(what)).collect()
    }

    fn finish(&self) -> Result<(), CacheError> {
        match self.lines.get(self.pos) {
            Some(_) => Err(malformed(self.pos + 1, "unexpected trailing content".to_string())),
            None => Ok(()),
        }
    }
}

fn malformed(line: usize, reason: String) -> CacheError {
    CacheError::MalformedCacheFile { line, reason }
}

impl SampleData {
    /// Bundle samples, checking that `z` is `y.len() x x.len()`.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Array2<f64>) -> Result<Self, CacheError> {
        let (m, n) = z.dim();
        if x.len() != n {
            return Err(CacheError::DimensionMismatch {
                what: "x",
                expected: n,
                got: x.len(),
            });
        }
        if y.len() != m {
            return Err(CacheError::DimensionMismatch {
                what: "y",
                expected: m,
                got: y.len(),
            });
        }
        Ok(Self { x, y, z })
    }

    /// Parse the text layout.
    ///
    /// # Errors
    /// * `MalformedCacheFile` naming the first line that is missing, unparsable or extra
    pub fn parse(text: &str) -> Result<Self, CacheError> {
        let mut lines = Lines::new(text);

        lines.label()?;
        let n: usize = lines.parse("knot count n")?;
        lines.label()?;
        let m: usize = lines.parse("knot count m")?;

        lines.label()?;
        let x = lines.values("x value", n)?;
        lines.label()?;
        let y = lines.values("y value", m)?;
        lines.label()?;
        let count = n
            .checked_mul(m)
            .ok_or_else(|| malformed(4, format!("grid size {n}x{m} overflows")))?;
        let flat = lines.values("z value", count)?;
        lines.finish()?;

        // Stored y-major, consecutive values walk along x
        let z = Array2::from_shape_fn((m, n), |(i, j)| flat[i * n + j]);
        log::debug!("Parsed {n}x{m} sample grid");

        Ok(Self { x, y, z })
    }

    /// Read and parse a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Write the text layout. Values round-trip exactly through [`SampleData::parse`].
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), CacheError> {
        let (n, m) = (self.x.len(), self.y.len());
        writeln!(w, "n:")?;
        writeln!(w, "{n}")?;
        writeln!(w, "m:")?;
        writeln!(w, "{m}")?;
        writeln!(w, "x:")?;
        for v in &self.x {
            writeln!(w, "{v}")?;
        }
        writeln!(w, "y:")?;
        for v in &self.y {
            writeln!(w, "{v}")?;
        }
        writeln!(w, "z:")?;
        for i in 0..m {
            for j in 0..n {
                writeln!(w, "{}", self.z[[i, j]])?;
            }
        }
        Ok(())
    }

    /// Write the text layout to a new file, replacing any existing one.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), CacheError> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write(&mut w)?;
        w.flush()?;
        Ok(())
    }
}

impl FromStr for SampleData {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    const SAMPLE: &str = "\
n
3
m
2
x
0.0
1.0
2.0
y
10.0
20.0
z
1
2
3
4
5
6

";

    #[test]
    fn test_parse() {
        let data = SAMPLE.parse::<SampleData>().unwrap();
        assert_eq!(data.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.y, vec![10.0, 20.0]);
        // y-major: consecutive values walk along x
        assert_eq!(data.z, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_parse_rows_follow_y() {
        // Hand-written 4 x 3 grid with z = 100 * y + x, rows of the z block ordered by y
        let mut text = String::from("n:\n4\nm:\n3\nx:\n0\n1\n2\n3\ny:\n5\n6\n7\nz:\n");
        for y in [5, 6, 7] {
            for x in [0, 1, 2, 3] {
                text.push_str(&format!("{}\n", 100 * y + x));
            }
        }
        let data = SampleData::parse(&text).unwrap();
        assert_eq!(data.z.dim(), (3, 4));
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(data.z[[i, j]], 100.0 * data.y[i] + data.x[j]);
            }
        }

        let mut buf = Vec::new();
        data.write(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), text);
    }

    #[test]
    fn test_write_then_parse_agree() {
        let data = SampleData::new(
            vec![0.1, 0.2, 0.3],
            vec![-1.0, 1.0 / 3.0],
            array![[1.5, -2.25, 1e-17], [std::f64::consts::PI, 0.0, 7.0]],
        )
        .unwrap();
        let mut buf = Vec::new();
        data.write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("n:\n3\nm:\n2\nx:\n"));
        assert_eq!(SampleData::parse(&text).unwrap(), data);
    }

    #[test]
    fn test_malformed() {
        let lines: Vec<&str> = SAMPLE.lines().collect();

        // Missing the last z value
        let short = lines[..lines.len() - 2].join("\n");
        assert!(matches!(
            SampleData::parse(&short),
            Err(CacheError::MalformedCacheFile { line: 18, .. })
        ));

        // Unparsable count
        let bad_count = SAMPLE.replacen("\n3\n", "\nthree\n", 1);
        assert!(matches!(
            SampleData::parse(&bad_count),
            Err(CacheError::MalformedCacheFile { line: 2, .. })
        ));

        // Unparsable value
        let bad_value = SAMPLE.replace("20.0", "twenty");
        assert!(matches!(
            SampleData::parse(&bad_value),
            Err(CacheError::MalformedCacheFile { line: 11, .. })
        ));

        // Extra content after the z block
        let extra = format!("{}\n7\n", lines[..lines.len() - 1].join("\n"));
        assert!(matches!(
            SampleData::parse(&extra),
            Err(CacheError::MalformedCacheFile { line: 19, .. })
        ));

        assert!(matches!(
            SampleData::read("/nonexistent/samples.txt"),
            Err(CacheError::Io(_))
        ));
    }
}
