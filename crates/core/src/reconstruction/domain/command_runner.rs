use thiserror::Error;

use crate::reconstruction::domain::tool_invocation::ToolInvocation;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("program `{program}` not found")]
    NotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("exited with status {code}")]
    ExitStatus { code: i32 },
    #[error("terminated by signal")]
    Terminated,
}

/// Executes reconstruction tool invocations synchronously.
///
/// Returns only after the process has exited. A zero exit status is the
/// sole success signal; the tool's own output is not interpreted.
pub trait CommandRunner: Send {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<(), RunError>;
}
