//! HTTP API handlers for lakbay-server

pub mod content;
pub mod health;
pub mod proxy;
pub mod quiz;
pub mod settings;

pub use content::content_routes;
pub use health::health_routes;
pub use proxy::proxy_routes;
pub use quiz::quiz_routes;
pub use settings::settings_routes;
