//! Publish pipeline
//!
//! Sequences a run: load manifest, build, minify, then (when an upload is
//! configured) mirror to the remote host and run post-deploy commands.
//! Any stage error aborts the run; later stages never see partial state.

use std::path::Path;
use std::sync::Arc;

use crate::config::{self, PublishConfig};
use crate::domain::ports::{
    AssetTransformer, CommandRunner, NoopEventSink, PublishEvent, PublishEventSink,
    RemoteCommandResult, RemoteConnector, Stage,
};
use crate::error::{PublishError, PublishResult};

use super::build::build;
use super::minify::MinifyTask;
use super::mirror::{cleanup_output, MirrorSummary, RemoteMirror};
use super::post_deploy::run_post_commands;

/// What a successful run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub minified: usize,
    /// `None` when no upload is configured
    pub mirror: Option<MirrorSummary>,
    pub commands: Vec<RemoteCommandResult>,
}

impl PublishReport {
    pub fn uploaded(&self) -> usize {
        self.mirror.map(|m| m.uploaded).unwrap_or(0)
    }

    pub fn deleted(&self) -> usize {
        self.mirror.map(|m| m.deleted).unwrap_or(0)
    }
}

/// Publish orchestrator, parameterised by its ports
pub struct Publisher {
    runner: Arc<dyn CommandRunner>,
    transformer: Arc<dyn AssetTransformer>,
    connector: Arc<dyn RemoteConnector>,
    events: Arc<dyn PublishEventSink>,
}

impl Publisher {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        transformer: Arc<dyn AssetTransformer>,
        connector: Arc<dyn RemoteConnector>,
    ) -> Self {
        Self {
            runner,
            transformer,
            connector,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn PublishEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Load the manifest from `project_root` and publish.
    pub fn run(&self, project_root: &Path) -> PublishResult<PublishReport> {
        self.stage(Stage::LoadingConfig);
        let manifest = config::manifest_path(project_root);
        let (config, warnings) = config::load_with_warnings(&manifest)?;
        for warning in warnings {
            tracing::warn!("{}", warning);
            self.events.on_event(PublishEvent::ConfigWarning {
                message: warning.to_string(),
            });
        }
        self.run_with_config(project_root, &config)
    }

    /// Publish with an already loaded manifest.
    pub fn run_with_config(
        &self,
        project_root: &Path,
        config: &PublishConfig,
    ) -> PublishResult<PublishReport> {
        let events = self.events.as_ref();
        let output_dir = config.output_path(project_root);
        let mut report = PublishReport::default();

        self.stage(Stage::Building);
        build(self.runner.as_ref(), project_root, &output_dir, config)?;

        if !config.minify.is_empty() {
            self.stage(Stage::Minifying);
            let task = MinifyTask::from_rules(project_root, &config.minify)?;
            tracing::info!(files = task.len(), "minifying assets");
            report.minified = task.run(self.transformer.as_ref(), events)?;
        }

        if let Some(upload) = &config.upload {
            if !output_dir.is_dir() {
                return Err(PublishError::OutputMissing { path: output_dir });
            }
            let exclude = config.exclude_set();
            let summary = {
                let client = self.connector.open_transfer(upload)?;
                let mut mirror =
                    RemoteMirror::new(client.as_ref(), &upload.destination, &exclude, events);

                self.stage(Stage::CleaningRemote);
                mirror.delete_remote(&upload.destination)?;

                self.stage(Stage::Uploading);
                mirror.upload_local(&output_dir)?;
                mirror.summary()
            };
            report.mirror = Some(summary);

            self.stage(Stage::CleaningLocal);
            cleanup_output(&output_dir)?;

            if !upload.execute.is_empty() {
                self.stage(Stage::PostCommands);
                let shell = self.connector.open_shell(upload)?;
                report.commands = run_post_commands(
                    shell.as_ref(),
                    &upload.execute,
                    upload.fail_on_command_error,
                    events,
                )?;
            }
        }

        events.on_event(PublishEvent::Completed {
            minified: report.minified,
            uploaded: report.uploaded(),
            deleted: report.deleted(),
        });
        Ok(report)
    }

    fn stage(&self, stage: Stage) {
        tracing::debug!(stage = stage.id(), "stage started");
        self.events.on_event(PublishEvent::StageStarted(stage));
    }
}
