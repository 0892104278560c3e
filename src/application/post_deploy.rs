//! Post-deploy commands
//!
//! Runs the configured commands one at a time on the remote shell session.
//! A non-zero exit is reported and the next command still runs, unless the
//! manifest asks for strict mode.

use crate::domain::ports::{PublishEvent, PublishEventSink, RemoteCommandResult, RemoteShell};
use crate::error::{PublishError, PublishResult};

pub fn run_post_commands(
    shell: &dyn RemoteShell,
    commands: &[String],
    fail_on_error: bool,
    events: &dyn PublishEventSink,
) -> PublishResult<Vec<RemoteCommandResult>> {
    let mut results = Vec::with_capacity(commands.len());

    for command in commands {
        let result = shell.run(command)?;
        events.on_event(PublishEvent::CommandExecuted {
            command: result.command.clone(),
            exit_status: result.exit_status,
            output: result.visible_output(),
        });

        if !result.success() {
            let status = result
                .exit_status
                .map(|code| code.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            if fail_on_error {
                let output = result.visible_output().unwrap_or_default();
                return Err(PublishError::RemoteCommand {
                    command: result.command,
                    status,
                    output,
                });
            }
            tracing::warn!(command = %result.command, %status, "post publish command failed");
        }

        results.push(result);
    }

    Ok(results)
}
