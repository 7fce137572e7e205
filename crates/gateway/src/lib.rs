#![doc = include_str!("../README.md")]

mod config;
pub use config::GatewayConfig;

mod functions;
pub use functions::{FunctionSet, SharedSource};

mod event;
pub use event::{inbound_event, outbound_event, GatewayResponse};

mod compression;
pub use compression::{accepts_gzip, MinSizeCompression};

mod server;
pub use server::{router, serve, AppState};
