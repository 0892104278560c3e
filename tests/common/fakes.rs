//! In-memory port implementations.
//!
//! Every fake is a cheap `Clone` handle over shared state so a test can keep
//! one copy for assertions while the publisher owns another.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use publisher::config::UploadConfig;
use publisher::domain::ports::{
    AssetKind, AssetTransformer, CommandError, CommandOutput, CommandRunner, CommandSpec,
    PublishEvent, PublishEventSink, RemoteCommandResult, RemoteConnector, RemoteEntry,
    RemoteFileSystem, RemoteShell, Stage, TransferError,
};

fn parent_of(path: &str) -> Option<&str> {
    let idx = path.rfind('/')?;
    Some(if idx == 0 { "/" } else { &path[..idx] })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(Vec<u8>),
}

#[derive(Default)]
struct RemoteState {
    nodes: BTreeMap<String, Node>,
    ops: Vec<String>,
    fail_upload: Option<String>,
}

impl RemoteState {
    fn mkdir_p(&mut self, path: &str) {
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            self.nodes.entry(current.clone()).or_insert(Node::Dir);
        }
    }

    fn is_dir(&self, path: &str) -> bool {
        path == "/" || self.nodes.get(path) == Some(&Node::Dir)
    }
}

/// Remote filesystem with `mkdir -p` semantics.
///
/// Uploads into a directory that was never created are rejected, which
/// makes directory-before-file ordering observable.
#[derive(Clone, Default)]
pub struct MemoryRemote {
    state: Arc<Mutex<RemoteState>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_file(&self, path: &str, content: &str) -> &Self {
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = parent_of(path) {
            state.mkdir_p(parent);
        }
        state
            .nodes
            .insert(path.to_string(), Node::File(content.as_bytes().to_vec()));
        self
    }

    pub fn seed_dir(&self, path: &str) -> &Self {
        self.state.lock().unwrap().mkdir_p(path);
        self
    }

    /// Make uploads to `path` fail
    pub fn fail_upload_to(&self, path: &str) {
        self.state.lock().unwrap().fail_upload = Some(path.to_string());
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        match self.state.lock().unwrap().nodes.get(path) {
            Some(Node::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.state.lock().unwrap().nodes.contains_key(path)
    }

    /// Snapshot of every node below `root`
    pub fn tree(&self, root: &str) -> BTreeMap<String, Node> {
        let prefix = format!("{}/", root.trim_end_matches('/'));
        self.state
            .lock()
            .unwrap()
            .nodes
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, node)| (path.clone(), node.clone()))
            .collect()
    }

    /// Operations in call order, e.g. `mkdir /srv/site`, `put /srv/site/a.txt`
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }
}

impl RemoteFileSystem for MemoryRemote {
    fn list(&self, dir: &str) -> Result<Vec<RemoteEntry>, TransferError> {
        let state = self.state.lock().unwrap();
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        Ok(state
            .nodes
            .iter()
            .filter_map(|(path, node)| {
                let name = path.strip_prefix(&prefix)?;
                if name.is_empty() || name.contains('/') {
                    return None;
                }
                Some(match node {
                    Node::Dir => RemoteEntry::directory(name, path.clone()),
                    Node::File(_) => RemoteEntry::file(name, path.clone()),
                })
            })
            .collect())
    }

    fn create_dir(&self, path: &str) -> Result<(), TransferError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("mkdir {}", path));
        if matches!(state.nodes.get(path), Some(Node::File(_))) {
            return Err(TransferError::remote("mkdir", path, "File exists"));
        }
        state.mkdir_p(path);
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<(), TransferError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("rm {}", path));
        if !matches!(state.nodes.get(path), Some(Node::File(_))) {
            return Err(TransferError::remote("rm", path, "No such file"));
        }
        state.nodes.remove(path);
        Ok(())
    }

    fn remove_dir(&self, path: &str) -> Result<(), TransferError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("rmdir {}", path));
        let prefix = format!("{}/", path);
        if state.nodes.keys().any(|k| k.starts_with(&prefix)) {
            return Err(TransferError::remote("rmdir", path, "Directory not empty"));
        }
        state.nodes.remove(path);
        Ok(())
    }

    fn upload(&self, source: &mut dyn Read, path: &str) -> Result<(), TransferError> {
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|e| TransferError::Connection(e.to_string()))?;

        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("put {}", path));
        if state.fail_upload.as_deref() == Some(path) {
            return Err(TransferError::Connection("connection reset".to_string()));
        }
        let parent = parent_of(path).unwrap_or("/");
        if !state.is_dir(parent) {
            return Err(TransferError::remote("upload", path, "No such directory"));
        }
        state.nodes.insert(path.to_string(), Node::File(bytes));
        Ok(())
    }
}

/// Remote shell that answers every command with a configured exit code
#[derive(Clone, Default)]
pub struct ScriptedShell {
    codes: Arc<Mutex<HashMap<String, i32>>>,
    ran: Arc<Mutex<Vec<String>>>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_with(&self, command: &str, code: i32) {
        self.codes.lock().unwrap().insert(command.to_string(), code);
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
}

impl RemoteShell for ScriptedShell {
    fn run(&self, command: &str) -> Result<RemoteCommandResult, TransferError> {
        self.ran.lock().unwrap().push(command.to_string());
        let code = self.codes.lock().unwrap().get(command).copied().unwrap_or(0);
        Ok(RemoteCommandResult {
            command: command.to_string(),
            exit_status: Some(code),
            output: format!("{} done\n", command),
            error: String::new(),
        })
    }
}

/// Hands out the shared fakes and counts connections
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub remote: MemoryRemote,
    pub shell: ScriptedShell,
    opened: Arc<Mutex<Vec<&'static str>>>,
    refuse: bool,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose every connection attempt fails
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// `"transfer"` / `"shell"` per session opened, in order
    pub fn opened(&self) -> Vec<&'static str> {
        self.opened.lock().unwrap().clone()
    }
}

impl RemoteConnector for FakeConnector {
    fn open_transfer(
        &self,
        upload: &UploadConfig,
    ) -> Result<Box<dyn RemoteFileSystem>, TransferError> {
        if self.refuse {
            return Err(TransferError::Connection(format!(
                "cannot reach {}",
                upload.host
            )));
        }
        self.opened.lock().unwrap().push("transfer");
        Ok(Box::new(self.remote.clone()))
    }

    fn open_shell(&self, upload: &UploadConfig) -> Result<Box<dyn RemoteShell>, TransferError> {
        if self.refuse {
            return Err(TransferError::Connection(format!(
                "cannot reach {}",
                upload.host
            )));
        }
        self.opened.lock().unwrap().push("shell");
        Ok(Box::new(self.shell.clone()))
    }
}

/// Build tool stand-in: records invocations, exits with a fixed status
#[derive(Clone)]
pub struct FakeBuild {
    status: i32,
    output: String,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl FakeBuild {
    pub fn succeeding() -> Self {
        Self::exiting(0, "Build succeeded.")
    }

    pub fn exiting(status: i32, output: &str) -> Self {
        Self {
            status,
            output: output.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeBuild {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        self.calls.lock().unwrap().push(spec.clone());
        Ok(CommandOutput {
            status: Some(self.status),
            stdout: self.output.clone(),
            stderr: String::new(),
        })
    }

    fn run_with_input(
        &self,
        spec: &CommandSpec,
        _input: &mut dyn Read,
    ) -> Result<CommandOutput, CommandError> {
        self.run(spec)
    }
}

/// Prefixes `/*min*/` so double minification shows up in file contents
#[derive(Clone, Default)]
pub struct MarkingTransformer {
    calls: Arc<Mutex<Vec<AssetKind>>>,
}

pub const MIN_MARK: &str = "/*min*/";

impl MarkingTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<AssetKind> {
        self.calls.lock().unwrap().clone()
    }
}

impl AssetTransformer for MarkingTransformer {
    fn transform(&self, kind: AssetKind, source: &str) -> Result<String, String> {
        self.calls.lock().unwrap().push(kind);
        if source.contains("SYNTAX ERROR") {
            return Err("unexpected token".to_string());
        }
        Ok(format!("{}{}", MIN_MARK, source.trim()))
    }
}

/// Event sink that keeps every event
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<PublishEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PublishEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PublishEvent::StageStarted(stage) => Some(stage),
                _ => None,
            })
            .collect()
    }

    pub fn minified(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PublishEvent::Minified { path } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn excluded(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PublishEvent::Excluded { path } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl PublishEventSink for RecordingSink {
    fn on_event(&self, event: PublishEvent) {
        self.events.lock().unwrap().push(event);
    }
}
