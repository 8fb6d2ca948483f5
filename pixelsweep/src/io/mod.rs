//! I/O helpers for the sweep driver.

pub mod config;
pub mod process;
