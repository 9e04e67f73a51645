//! Logger port backed by `tracing`.

use tracing::{error, info, warn};

use crate::ports::outbound::Logger;

/// Forwards application log lines to the `mcp_demo::app` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "mcp_demo::app", "{}", message);
    }

    fn warn(&self, message: &str) {
        warn!(target: "mcp_demo::app", "{}", message);
    }

    fn error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>) {
        match cause {
            Some(cause) => error!(target: "mcp_demo::app", error = %cause, "{}", message),
            None => error!(target: "mcp_demo::app", "{}", message),
        }
    }
}
