pub mod config;
pub mod consumer;
pub mod error;
pub mod fallback;
pub mod gateway;

pub use config::{GatewayConfig, SETUP_INSTRUCTIONS};
pub use consumer::{FetchError, ProxyClient, ReviewsFetcher, ReviewsView, ViewState};
pub use error::{ConfigError, GatewayError, UpstreamResource};
pub use fallback::fallback_snapshot;
pub use gateway::YelpGateway;
