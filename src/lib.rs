//! Shell command helpers: a runner that captures trimmed output, a fail-fast
//! variant built on it, user-facing expectations, and a toolchain version check.

pub mod config;
pub mod expect;
pub mod runner;
pub mod utils;
pub mod version;

pub use expect::{ERROR_PREFIX, ExpectError, Expectation, FailureMode, expect, expect_with};
pub use runner::options::{Redirect, RunOptions};
pub use runner::output::CmdOutput;
pub use runner::{run_cmd, run_cmd_no_fail};
pub use version::{Version, check_minimum_version, check_minimum_version_with, toolchain_version};
