mod score_calculator;
mod score_components;
mod score_error;
pub mod score_io;
mod score_report;

pub use score_calculator::ScoreCalculator;
pub use score_components::ScoreComponents;
pub use score_error::ScoreError;
pub use score_report::ScoreReport;
