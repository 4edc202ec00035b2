//! Extraction runs: planning, fetching, writing and reporting.

mod exporter;
pub use exporter::*;

mod output;
pub use output::*;

mod plan;
pub use plan::*;

mod result;
pub use result::*;

mod statistics;
pub use statistics::*;

mod stop;
pub use stop::*;
