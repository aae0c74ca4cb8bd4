pub mod command_runner;
pub mod ply;
pub mod stage;
pub mod tool_invocation;
pub mod workspace;
