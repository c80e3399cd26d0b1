mod score_app;
mod score_app_error;

pub use score_app::{ScoreApp, ScoreOperation};
pub use score_app_error::ScoreAppError;
