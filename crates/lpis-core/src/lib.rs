pub mod config;
pub mod logging;

pub mod audit;
pub mod context;
pub mod gateway;
pub mod metadata;
pub mod server;
