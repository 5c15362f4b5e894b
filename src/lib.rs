mod api;
pub mod args;
pub mod classify;
pub mod commands;
mod config;
pub mod diff;
mod enrich;
mod error;
mod export;
pub mod model;
pub mod summary;
mod utils;

#[cfg(test)]
mod test;

pub use api::Mode;
pub use config::Config;
pub use error::Error;
pub use error::Result;
