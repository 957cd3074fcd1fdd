pub mod commands;
pub mod config;
pub mod inject;
pub mod music;
pub mod package;
pub mod runtime;
