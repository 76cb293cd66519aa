pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;
pub mod week;

pub use app::router;
pub use config::{Config, StorageMode};
pub use db::load_data;
pub use session::{Notice, Session};
pub use state::AppState;
pub use storage::{Storage, WeekStorage};
