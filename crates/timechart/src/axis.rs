// File: crates/timechart/src/axis.rs
// Summary: Axis model with label and visible range.

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn time() -> Self {
        Self::new("Time", 0.0, 1.0)
    }

    pub fn price() -> Self {
        Self::new("Price", 0.0, 100.0)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
