//! quote-chart: price chart rendering engine.
//!
//! Maps quote samples onto pixels (continuous or market-hours compressed),
//! derives indicator overlays and draws them through a pluggable backend
//! producing SVG markup or PNG bytes.

pub mod axis;
pub mod chart;
pub mod core;
pub mod error;
pub mod render;
pub mod series;
pub mod telemetry;

pub use chart::{Chart, ChartLayout, ChartRequest, RenderedChart, Timeframe, TimeframeClass};
pub use error::{ChartError, ChartResult};
pub use render::{OutputFormat, Renderer};
pub use series::{Series, YAxisType};
