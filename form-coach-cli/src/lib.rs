// Library exports for the Form Coach CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod output;
