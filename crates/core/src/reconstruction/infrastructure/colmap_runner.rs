use std::ffi::OsString;
use std::io;
use std::process::Command;

use crate::reconstruction::domain::command_runner::{CommandRunner, RunError};
use crate::reconstruction::domain::tool_invocation::ToolInvocation;
use crate::shared::constants::COLMAP_PROGRAM;

/// Runs COLMAP subcommands as child processes.
///
/// The child inherits stdout/stderr so COLMAP's own progress output reaches
/// the terminal unchanged.
pub struct ColmapRunner {
    program: OsString,
}

impl ColmapRunner {
    /// `program` is an executable name resolved through `PATH`, or a path.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Default for ColmapRunner {
    fn default() -> Self {
        Self::new(COLMAP_PROGRAM)
    }
}

impl CommandRunner for ColmapRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<(), RunError> {
        log::debug!("$ {} {invocation}", self.program_name());

        let status = Command::new(&self.program)
            .arg(invocation.subcommand())
            .args(invocation.args())
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => RunError::NotFound {
                    program: self.program_name(),
                    source: e,
                },
                _ => RunError::Spawn {
                    program: self.program_name(),
                    source: e,
                },
            })?;

        if status.success() {
            Ok(())
        } else {
            match status.code() {
                Some(code) => Err(RunError::ExitStatus { code }),
                None => Err(RunError::Terminated),
            }
        }
    }
}
