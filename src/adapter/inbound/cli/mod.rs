//! CLI module graph.

pub mod check;
pub mod command;
pub mod init;
pub mod output;
pub mod serve;
