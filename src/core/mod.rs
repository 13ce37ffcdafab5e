pub mod calendar;
pub mod candlestick;
pub mod market_hours;
pub mod math;
pub mod palette;
pub mod primitives;
pub mod range;
pub mod style;
pub mod types;

pub use candlestick::{CandleGeometry, OhlcBar, project_candle};
pub use market_hours::{HolidayPredicate, MarketHoursRange, MarketSession};
pub use palette::{Palette, default_font, default_palette};
pub use range::{ContinuousRange, Range, RangeOrientation};
pub use style::{DashArray, Style};
pub use types::{BoundedPoint, DataPoint, Padding, PixelBox, Sample, Viewport};
