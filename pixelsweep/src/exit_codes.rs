//! Stable exit codes for the `pixelsweep` CLI.

/// Sweep finished, whatever the individual invocations reported.
pub const OK: i32 = 0;
/// Usage error, missing input, invalid config, or unwritable output tree.
pub const FAILURE: i32 = 1;
