//! Worker thread that owns the upload controller and serves UI commands.

pub mod commands;
pub mod runtime;
