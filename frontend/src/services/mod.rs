pub mod api;
pub mod config;
pub mod date_utils;
pub mod logging;

pub use api::HttpApiClient;
pub use config::AppConfig;
pub use logging::Logger;
