pub mod batch;
pub mod collector;
pub mod config;
pub mod device;
pub mod errors;
pub mod throttle;
pub mod transport;
