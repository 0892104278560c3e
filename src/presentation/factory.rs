//! Publisher Factory
//!
//! Wires the orchestrator to its production infrastructure.
//! This is the dependency injection point for the binary.

use std::sync::Arc;

use crate::application::Publisher;
use crate::domain::ports::{CommandRunner, PublishEventSink};
use crate::infrastructure::{
    ConsoleEventSink, JsonEventSink, MinifierTransformer, SshConnector, SystemCommandRunner,
};

/// Event sink for the chosen output format
pub fn create_event_sink(json: bool) -> Arc<dyn PublishEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout())
    }
}

/// Create a publisher with all production dependencies
///
/// The build and the SSH sessions share one process runner.
pub fn create_publisher(json: bool) -> Publisher {
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner::new());
    Publisher::new(
        runner.clone(),
        Arc::new(MinifierTransformer),
        Arc::new(SshConnector::new(runner)),
    )
    .with_events(create_event_sink(json))
}
