//! # Stockroom Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stockroom <command> [args]                                             │
//! │                                                                         │
//! │  main.rs ────► Collects arguments, starts the Tokio runtime             │
//! │                                                                         │
//! │  lib.rs ─────► Config, tracing, App::start, command dispatch            │
//! │                                                                         │
//! │  stdout ◄───── JSON result        stderr ◄───── logs, error JSON        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//! - `0`: command succeeded
//! - `1`: command returned an error
//! - `2`: the command line could not be parsed

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    stockroom_dashboard::run(std::env::args().skip(1).collect()).await
}
