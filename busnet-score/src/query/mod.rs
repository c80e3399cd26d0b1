mod columnar_format;
mod columnar_source;
mod mean_accumulator;
pub mod query_ops;
mod query_error;

pub use columnar_format::ColumnarFormat;
pub use columnar_source::ColumnarSource;
pub use mean_accumulator::MeanAccumulator;
pub use query_error::QueryError;
pub use query_ops::WindowCount;
