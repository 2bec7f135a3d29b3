//! Game-server instances: registry, persisted config, game settings, files and event log

pub mod config;
pub mod events;
pub mod fs;
pub mod registry;
pub mod service;

pub use registry::InstanceRegistry;
