use crate::cli::Command;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// One-shot commands run from a terminal (`form`, `resolve`).
    Interactive,
    /// The long-running form server.
    Service,
    /// Output is consumed by a launcher process; the console stays quiet.
    Launcher,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Launcher)
    }
}

/// Derive the active execution context from a parsed CLI command.
pub fn detect_context(command: &Command) -> ExecutionContext {
    match command {
        Command::Form(_) | Command::Resolve(_) => ExecutionContext::Interactive,
        Command::Serve(_) => ExecutionContext::Service,
        Command::LaunchCommand(_) => ExecutionContext::Launcher,
    }
}
