pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use config::Config;

/// Per-client request counter for the fixed-window rate limiter.
pub struct RateWindow {
    pub count: u32,
    pub window_start: Instant,
}

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rate_limits: Arc<Mutex<HashMap<IpAddr, RateWindow>>>,
}
