pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;
pub mod ui;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
