use clap::{ArgAction, Args, Parser, Subcommand};
use snipshare_core::config::{KvBackend, RecordBackend, CLOUDFLARE_API_BASE};
use snipshare_core::{Config, Result, SnipshareError};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author = "bahdotsh",
    version = env!("CARGO_PKG_VERSION"),
    about = "snipshare - share code snippets behind a link",
    long_about = "snipshare stores code snippets for seven days under a random id and serves share pages for snippets kept in PocketBase."
)]
pub struct Snipshare {
    #[clap(
        long,
        short,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v debug, -vv trace)"
    )]
    pub verbose: u8,

    #[clap(
        long,
        global = true,
        env = "SNIPSHARE_CONFIG",
        help = "Path to a JSON config file (default: ~/.snipshare/config.json)"
    )]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub commands: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(StoreArgs),
    /// Share a snippet through a running server and print its id
    Share {
        #[clap(help = "File to share; reads stdin when omitted")]
        file: Option<PathBuf>,

        #[clap(long, short, env = "SNIPSHARE_SERVER", help = "Server URL")]
        server: Option<String>,
    },
    /// Fetch a shared snippet and print its code
    Fetch {
        #[clap(help = "Snippet id")]
        id: String,

        #[clap(long, short, env = "SNIPSHARE_SERVER", help = "Server URL")]
        server: Option<String>,
    },
    /// Resolve share page data straight from the durable store
    Page {
        #[clap(help = "Record id")]
        id: String,

        #[clap(flatten)]
        stores: StoreArgs,
    },
    /// Show the port of the running API server
    Port,
    /// Print the effective configuration
    Config(StoreArgs),
}

/// Overrides layered on top of the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct StoreArgs {
    #[clap(long, short, env = "SNIPSHARE_PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    #[clap(long, env = "SNIPSHARE_BIND", help = "Address to bind")]
    pub bind: Option<IpAddr>,

    #[clap(long, env = "SNIPSHARE_TTL_SECS", help = "Snippet lifetime in seconds")]
    pub ttl_secs: Option<u64>,

    #[clap(long, env = "POCKETBASE_URL", help = "PocketBase base URL")]
    pub pocketbase_url: Option<String>,

    #[clap(
        long,
        conflicts_with = "pocketbase_url",
        help = "Read durable records from a local JSON file instead of PocketBase"
    )]
    pub records_file: Option<PathBuf>,

    #[clap(long, env = "SNIPSHARE_PUBLIC_URL", help = "Base of public share links")]
    pub public_url: Option<String>,

    #[clap(long, env = "CF_ACCOUNT_ID", help = "Cloudflare account id")]
    pub cf_account_id: Option<String>,

    #[clap(long, env = "CF_KV_NAMESPACE_ID", help = "Cloudflare KV namespace id")]
    pub cf_namespace_id: Option<String>,

    #[clap(long, env = "CF_API_TOKEN", hide_env_values = true, help = "Cloudflare API token")]
    pub cf_api_token: Option<String>,
}

impl StoreArgs {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(ttl_secs) = self.ttl_secs {
            config.ephemeral.ttl_secs = ttl_secs;
        }
        if let Some(base_url) = &self.pocketbase_url {
            config.durable.backend = RecordBackend::PocketBase {
                base_url: base_url.clone(),
            };
        }
        if let Some(path) = &self.records_file {
            config.durable.backend = RecordBackend::File { path: path.clone() };
        }
        if let Some(public_url) = &self.public_url {
            config.durable.public_url = Some(public_url.clone());
        }

        match (&self.cf_account_id, &self.cf_namespace_id, &self.cf_api_token) {
            (None, None, None) => {}
            (Some(account_id), Some(namespace_id), Some(api_token)) => {
                let api_base = match &config.ephemeral.backend {
                    KvBackend::Cloudflare { api_base, .. } => api_base.clone(),
                    KvBackend::Memory => CLOUDFLARE_API_BASE.to_string(),
                };
                config.ephemeral.backend = KvBackend::Cloudflare {
                    account_id: account_id.clone(),
                    namespace_id: namespace_id.clone(),
                    api_token: api_token.clone(),
                    api_base,
                };
            }
            _ => {
                return Err(SnipshareError::Other(
                    "Cloudflare KV needs an account id, a namespace id and an API token"
                        .to_string(),
                ))
            }
        }

        Ok(())
    }
}
