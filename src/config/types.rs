//! Manifest type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::ExcludeSet;

/// Port used when the host spec carries no `:port` suffix
pub const DEFAULT_SSH_PORT: u16 = 22;

fn default_build_tool() -> String {
    "dotnet".to_string()
}

fn default_publish_configuration() -> String {
    "Release".to_string()
}

/// Treat an explicit JSON `null` the same as a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Publish settings read from the project manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishConfig {
    /// Program invoked to produce the publish output
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Runtime identifier passed as `--runtime`
    #[serde(default, deserialize_with = "nullable")]
    pub publish_runtime: String,

    /// Build profile passed as `--configuration`
    #[serde(default = "default_publish_configuration")]
    pub publish_configuration: String,

    /// Output directory, relative to the project root
    #[serde(default, deserialize_with = "nullable")]
    pub output_dir: String,

    /// Root pattern -> `;`-separated extension filter
    #[serde(default, deserialize_with = "nullable")]
    pub minify: BTreeMap<String, String>,

    #[serde(default)]
    pub self_contained: bool,

    #[serde(default)]
    pub upload: Option<UploadConfig>,

    /// Relative paths that are neither deleted nor uploaded
    #[serde(default, deserialize_with = "nullable")]
    pub exclude: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            publish_runtime: String::new(),
            publish_configuration: default_publish_configuration(),
            output_dir: String::new(),
            minify: BTreeMap::new(),
            self_contained: false,
            upload: None,
            exclude: Vec::new(),
        }
    }
}

impl PublishConfig {
    /// Absolute output directory for a project rooted at `project_root`
    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output_dir)
    }

    pub fn exclude_set(&self) -> ExcludeSet {
        self.exclude.iter().collect()
    }

    /// Check value-level constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.build_tool.trim().is_empty() {
            return Err("BuildTool must not be empty".to_string());
        }
        if let Some(upload) = &self.upload {
            upload.validate()?;
        }
        validate_output_dir(&self.output_dir)
    }
}

/// The output tree is uploaded and then deleted, so it must name a
/// directory strictly below the project root.
fn validate_output_dir(output_dir: &str) -> Result<(), String> {
    let path = Path::new(output_dir.trim());
    let mut depth = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(format!("OutputDir must not contain '..': {}", output_dir))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("OutputDir must be relative: {}", output_dir))
            }
        }
    }
    if depth == 0 {
        return Err("OutputDir must name a directory below the project root".to_string());
    }
    Ok(())
}

/// How the SSH session authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    PrivateKey(PathBuf),
    Password(String),
}

/// Remote destination settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadConfig {
    /// `host[:port]`
    pub host: String,

    #[serde(default, deserialize_with = "nullable")]
    pub user: String,

    #[serde(default, deserialize_with = "nullable")]
    pub pass: String,

    /// Private key file; takes precedence over `pass` when set
    #[serde(default, deserialize_with = "nullable")]
    pub key: String,

    pub destination: String,

    /// Shell commands run on the remote host after the mirror completes
    #[serde(default, deserialize_with = "nullable")]
    pub execute: Vec<String>,

    /// Abort the run when a post-deploy command exits non-zero
    #[serde(default)]
    pub fail_on_command_error: bool,
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("pass", &if self.pass.is_empty() { "" } else { "<redacted>" })
            .field("key", &self.key)
            .field("destination", &self.destination)
            .field("execute", &self.execute)
            .field("fail_on_command_error", &self.fail_on_command_error)
            .finish()
    }
}

impl UploadConfig {
    /// Host name without the port suffix
    pub fn host(&self) -> &str {
        HostSpec::split(&self.host).0
    }

    /// Port from the host spec, 22 when absent
    pub fn port(&self) -> Result<u16, String> {
        HostSpec::parse(&self.host).map(|spec| spec.port)
    }

    /// `user@host`, or just the host when no user is configured
    pub fn ssh_target(&self) -> String {
        if self.user.is_empty() {
            self.host().to_string()
        } else {
            format!("{}@{}", self.user, self.host())
        }
    }

    pub fn authentication(&self) -> Authentication {
        if self.key.trim().is_empty() {
            Authentication::Password(self.pass.clone())
        } else {
            Authentication::PrivateKey(PathBuf::from(&self.key))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let spec = HostSpec::parse(&self.host)?;
        if spec.host.is_empty() {
            return Err("Upload.Host must name a host".to_string());
        }
        if self.destination.trim().is_empty() {
            return Err("Upload.Destination must not be empty".to_string());
        }
        Ok(())
    }
}

/// Parsed `host[:port]` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub host: String,
    pub port: u16,
}

impl HostSpec {
    fn split(spec: &str) -> (&str, Option<&str>) {
        match spec.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (spec, None),
        }
    }

    pub fn parse(spec: &str) -> Result<Self, String> {
        let (host, port) = Self::split(spec);
        let port = match port {
            None => DEFAULT_SSH_PORT,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("invalid port '{}' in host '{}'", raw, spec))?,
        };
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}
