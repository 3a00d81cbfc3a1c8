// File: crates/timechart/src/series.rs
// Summary: Price series model: (timestamp, value) samples rendered as a line.

/// A line series of (x, y) points with x ascending.
#[derive(Clone, Debug, Default)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Build from integer-second samples, e.g. database rows.
    pub fn from_samples(samples: &[(i64, f64)]) -> Self {
        Self::new(samples.iter().map(|&(t, v)| (t as f64, v)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last point in x order, if any.
    pub fn latest(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }
}
