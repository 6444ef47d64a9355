pub mod catalog;
pub mod config;
pub mod error;
pub mod fanout;
pub mod feed;
pub mod lookup;
pub mod models;
pub mod service;
pub mod sources;

pub use config::Config;
pub use error::{LookupError, UpstreamError};
pub use lookup::LookupService;
pub use models::*;
pub use service::{AppState, build_router, create_app};
