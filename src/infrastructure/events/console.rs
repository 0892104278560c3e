//! Console Event Sink
//!
//! Human-readable progress: a heading per stage and one indented line per
//! remote path touched.

use crate::domain::ports::{PublishEvent, PublishEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

const INDENT: &str = "    ";

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Text lines for an event; empty when the event is not shown.
    pub fn render(event: &PublishEvent) -> Vec<String> {
        match event {
            PublishEvent::StageStarted(stage) => vec![stage.heading().to_string()],
            PublishEvent::ConfigWarning { message } => vec![format!("Warning: {}", message)],
            PublishEvent::Minified { path } => vec![format!("Minified: {}", path.display())],
            PublishEvent::Excluded { path } => vec![format!("Excluded: {}", path)],
            PublishEvent::RemoteDeleted { path }
            | PublishEvent::DirectoryCreated { path }
            | PublishEvent::FileUploaded { path } => vec![format!("{}{}", INDENT, path)],
            PublishEvent::CommandExecuted {
                command, output, ..
            } => {
                let mut lines = vec![format!("Executed: {}", command)];
                if let Some(output) = output {
                    lines.push(output.clone());
                }
                lines
            }
            PublishEvent::Completed { .. } => vec!["Publish complete!".to_string()],
        }
    }
}

impl PublishEventSink for ConsoleEventSink {
    fn on_event(&self, event: PublishEvent) {
        if let Ok(mut writer) = self.writer.lock() {
            for line in Self::render(&event) {
                let _ = writeln!(writer, "{}", line);
            }
            let _ = writer.flush();
        }
    }
}
