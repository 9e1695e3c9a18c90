pub mod config;
pub mod filter;
pub mod library;
pub mod models;
pub mod scanner;

/// Audio file extensions we index
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "aif", "aiff", "mp3", "flac"];

/// Application name for XDG paths
pub const APP_NAME: &str = "sampledex";
