// Adapters - External system implementations

pub mod fs_source;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use fs_source::FsTextSource;
pub use toml_config::Settings;
