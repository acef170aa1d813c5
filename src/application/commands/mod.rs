//! 应用层 - 命令（写操作）

mod book_commands;

pub mod handlers;

pub use book_commands::*;
