pub mod commands;
pub mod config;
mod context;

pub use context::InitContext;
