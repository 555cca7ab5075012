//! # Till Entry Point
//!
//! Starts the Tokio runtime and hands over to [`till_terminal::run`].

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    till_terminal::run().await
}
