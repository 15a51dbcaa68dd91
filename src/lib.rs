#![cfg(unix)]

pub mod args;
pub mod child;
pub mod config;
pub mod launcher;
pub mod logging;
pub mod privileges;
pub mod result;
pub mod stdio;
pub mod username;
