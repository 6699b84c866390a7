mod app;
mod config;
mod score_error;
mod score_row;

pub use app::ScoreApp;
pub use config::{
    GridConfig, PointConfig, ReachabilityConfig, ScoreAppConfig, SearchConfig,
};
pub use score_error::ScoreError;
pub use score_row::{ScoreReport, ScoreRow};
