// File: crates/timechart/src/lib.rs
// Summary: Core library entry point; exports tick policy, chart model, and rendering.

pub mod axis;
pub mod bucket;
pub mod chart;
pub mod regime;
pub mod series;
pub mod theme;
pub mod ticks;
pub mod types;

pub use axis::Axis;
pub use chart::{Chart, RenderOptions};
pub use regime::{SpanRegime, Step};
pub use series::Series;
pub use theme::Theme;
pub use ticks::{Tick, TickError, TimeTicker};
