//! JSON Event Sink
//!
//! Outputs publish events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PublishEvent, PublishEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PublishEventSink for JsonEventSink {
    fn on_event(&self, event: PublishEvent) {
        let json = match event {
            PublishEvent::StageStarted(stage) => serde_json::json!({
                "event": "stage",
                "stage": stage.id(),
            }),

            PublishEvent::ConfigWarning { message } => serde_json::json!({
                "event": "warning",
                "message": message,
            }),

            PublishEvent::Minified { path } => serde_json::json!({
                "event": "minified",
                "path": path.display().to_string(),
            }),

            PublishEvent::RemoteDeleted { path } => serde_json::json!({
                "event": "remote_deleted",
                "path": path,
            }),

            PublishEvent::Excluded { path } => serde_json::json!({
                "event": "excluded",
                "path": path,
            }),

            PublishEvent::DirectoryCreated { path } => serde_json::json!({
                "event": "directory_created",
                "path": path,
            }),

            PublishEvent::FileUploaded { path } => serde_json::json!({
                "event": "uploaded",
                "path": path,
            }),

            PublishEvent::CommandExecuted {
                command,
                exit_status,
                output,
            } => serde_json::json!({
                "event": "command",
                "command": command,
                "exit_status": exit_status,
                "output": output,
            }),

            PublishEvent::Completed {
                minified,
                uploaded,
                deleted,
            } => serde_json::json!({
                "event": "complete",
                "status": "success",
                "minified": minified,
                "uploaded": uploaded,
                "deleted": deleted,
            }),
        };

        self.write_event(json);
    }
}
