use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "config.json";
pub const PORT_FILENAME: &str = "api_port.txt";
pub const DEFAULT_PORT: u16 = 3000;
/// Seven days.
pub const DEFAULT_TTL_SECS: u64 = 604_800;
pub const DEFAULT_POCKETBASE_URL: &str = "http://127.0.0.1:8090";
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare rejects `expiration_ttl` values below this.
pub const CLOUDFLARE_MIN_TTL_SECS: u64 = 60;

/// Get the snipshare configuration directory
pub fn get_config_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".snipshare"))
        .unwrap_or_else(|_| PathBuf::from(".snipshare"))
}

/// Get the path to the default config file
pub fn get_config_file_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILENAME)
}

/// Get the path to the file recording the running server's port
pub fn get_port_file_path() -> PathBuf {
    get_config_dir().join(PORT_FILENAME)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub ephemeral: EphemeralConfig,
    pub durable: DurableConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EphemeralConfig {
    pub backend: KvBackend,
    pub ttl_secs: u64,
}

impl Default for EphemeralConfig {
    fn default() -> Self {
        Self {
            backend: KvBackend::Memory,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

/// Where ephemeral snippets live.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KvBackend {
    Memory,
    Cloudflare {
        account_id: String,
        namespace_id: String,
        api_token: String,
        #[serde(default = "default_cloudflare_api_base")]
        api_base: String,
    },
}

fn default_cloudflare_api_base() -> String {
    CLOUDFLARE_API_BASE.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DurableConfig {
    pub backend: RecordBackend,
    /// Base of the public share address; falls back to the PocketBase URL.
    pub public_url: Option<String>,
}

impl Default for DurableConfig {
    fn default() -> Self {
        Self {
            backend: RecordBackend::PocketBase {
                base_url: DEFAULT_POCKETBASE_URL.to_string(),
            },
            public_url: None,
        }
    }
}

/// Where durable `codes` records are read from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordBackend {
    #[serde(rename = "pocketbase")]
    PocketBase { base_url: String },
    File { path: PathBuf },
}

impl Config {
    /// Read a config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly named file, or the default file when it exists, or
    /// fall back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::load(&get_config_file_path()) {
                Ok(config) => Ok(config),
                Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    Ok(Config::default())
                }
                Err(e) => Err(e),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ephemeral.ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "ephemeral.ttl_secs must be greater than zero".to_string(),
            ));
        }

        if let KvBackend::Cloudflare {
            account_id,
            namespace_id,
            api_token,
            api_base,
        } = &self.ephemeral.backend
        {
            for (name, value) in [
                ("account_id", account_id),
                ("namespace_id", namespace_id),
                ("api_token", api_token),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "ephemeral.backend.{} must not be empty",
                        name
                    )));
                }
            }
            check_url("ephemeral.backend.api_base", api_base)?;
            if self.ephemeral.ttl_secs < CLOUDFLARE_MIN_TTL_SECS {
                return Err(ConfigError::Invalid(format!(
                    "ephemeral.ttl_secs must be at least {} for the cloudflare backend",
                    CLOUDFLARE_MIN_TTL_SECS
                )));
            }
        }

        if let RecordBackend::PocketBase { base_url } = &self.durable.backend {
            check_url("durable.backend.base_url", base_url)?;
        }
        if let Some(public_url) = &self.durable.public_url {
            check_url("durable.public_url", public_url)?;
        }

        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ephemeral.ttl_secs)
    }

    /// Base address used to build share links.
    pub fn public_url(&self) -> String {
        if let Some(url) = &self.durable.public_url {
            return url.clone();
        }
        match &self.durable.backend {
            RecordBackend::PocketBase { base_url } => base_url.clone(),
            RecordBackend::File { .. } => format!("http://{}", self.server.socket_addr()),
        }
    }

    /// Copy safe to print: credentials are masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let KvBackend::Cloudflare { api_token, .. } = &mut config.ephemeral.backend {
            *api_token = "********".to_string();
        }
        config
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::Invalid(format!("{} is not a valid URL ({}): {}", field, e, value)))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid(format!(
            "{} cannot be used as a base URL: {}",
            field, value
        )));
    }
    Ok(())
}
