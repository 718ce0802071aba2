pub mod dataset;
pub mod primitives;
pub mod query;
pub mod types;
pub mod windowing;

pub use dataset::DatasetStore;
pub use query::RecordQuery;
pub use types::{DateRange, PriceRecord, SeriesPoint, YearRange};
pub use windowing::{records_in_date_window, records_in_year_window};
