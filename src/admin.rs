//! Access to the privileged helper that exports and unexports kernel lines.
//!
//! Unprivileged processes cannot write `/sys/class/gpio/export` themselves, so
//! claiming a line goes through a setuid helper (`gpio-admin` on Raspbian).
//! The helper is reached through the [`GpioAdmin`] trait so that tests, or a
//! deployment running as root, can substitute their own implementation.

use async_trait::async_trait;
use std::io;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Enum representing possible failures of a helper invocation.
///
/// - Spawn - The helper could not be started at all (missing binary, permissions).
/// - ExitStatus - The helper ran and reported failure. `None` means it was killed by a signal.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("failed to run helper command")]
    Spawn(#[source] io::Error),
    #[error("helper command exited with status {0:?}")]
    ExitStatus(Option<i32>),
}

/// Privileged export/unexport of kernel GPIO lines.
#[async_trait]
pub trait GpioAdmin: Send + Sync {
    /// Claim `line` for user space, optionally configuring its pull resistor.
    ///
    /// An empty `pull` means "leave the resistor alone".
    async fn export(&self, line: u32, pull: &str) -> Result<(), AdminError>;

    /// Hand `line` back to the kernel.
    async fn unexport(&self, line: u32) -> Result<(), AdminError>;
}

/// [`GpioAdmin`] running an external command. Success is the command's exit status.
#[derive(Debug, Clone)]
pub struct CommandAdmin {
    program: String,
}

impl CommandAdmin {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: &[String]) -> Result<(), AdminError> {
        debug!(program = %self.program, ?args, "Running GPIO helper");

        let status = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(AdminError::Spawn)?;

        if status.success() {
            Ok(())
        } else {
            Err(AdminError::ExitStatus(status.code()))
        }
    }
}

/// Arguments of an export invocation: `export <N>` plus the pull setting if one was given.
pub fn export_args(line: u32, pull: &str) -> Vec<String> {
    let mut args = vec![String::from("export"), line.to_string()];
    if !pull.is_empty() {
        args.push(pull.to_string());
    }
    args
}

/// Arguments of an unexport invocation: `unexport <N>`.
pub fn unexport_args(line: u32) -> Vec<String> {
    vec![String::from("unexport"), line.to_string()]
}

#[async_trait]
impl GpioAdmin for CommandAdmin {
    async fn export(&self, line: u32, pull: &str) -> Result<(), AdminError> {
        self.run(&export_args(line, pull)).await
    }

    async fn unexport(&self, line: u32) -> Result<(), AdminError> {
        self.run(&unexport_args(line)).await
    }
}
