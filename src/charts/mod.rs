//! Charts module - Chart description, interactive plotting and 3D rendering

mod builder;
mod plotter;
mod renderer;

pub use builder::{
    date_to_x, value_span, x_to_date, AxisLabels, ChartBuilder, ChartSpec, EventMarker,
    EventSegment, MarkerStyle, Series, SeriesPoint,
};
pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, Projection, RenderError, RgbFrame};
