//! Parameter sweep harness for the `pixelsort` image tool.
//!
//! For one input image the harness enumerates every interval algorithm, draws
//! a handful of random parameter sets for each, and runs the external tool
//! once per sorting algorithm, writing the results into a dated directory
//! tree for side-by-side comparison. The layering mirrors the usual split:
//!
//! - **Pure logic**: [`catalog`] (static algorithm tables), [`sampler`]
//!   (parameter drawing), [`layout`] (directory and file naming) and
//!   [`request`] (argument vectors). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config files, child processes).
//!   Isolated behind traits so tests never spawn the real tool.
//!
//! [`sweep`] coordinates the two to implement the CLI.

pub mod catalog;
pub mod exit_codes;
pub mod io;
pub mod layout;
pub mod logging;
pub mod request;
pub mod sampler;
pub mod sweep;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
