// Library exports for scatterplot

pub mod adapter;
pub mod category;
pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod palette;
pub mod render;
pub mod selection;
pub mod series;

pub use adapter::{transform, PlotAdapter, PlotOutput};
pub use category::extract_categories;
pub use chart::{build_chart_spec, ChartSpec, Presentation};
pub use color::{parse_color, parse_color_list, ColorValue};
pub use data::{ColumnMeta, Row, Table};
pub use error::ScatterError;
pub use palette::{ColorAssigner, PaletteColorAssigner, RandomColorAssigner};
pub use render::{JsonTarget, OutputFormat, RecordingTarget, RenderTarget};
pub use selection::{FieldRole, FieldSelection, FieldSelector, SelectorState};
pub use series::{build_series, parse_numeric, ColumnRoles, Series, SeriesBuild};
