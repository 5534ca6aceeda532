//! Library side of the `dash` command: configuration, logging, commands,
//! and terminal rendering.

pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
