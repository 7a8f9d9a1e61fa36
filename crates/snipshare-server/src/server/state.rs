use snipshare_core::config::KvBackend;
use snipshare_core::{
    open_record_store, CloudflareKv, Config, KvStore, MemoryKv, PageLoader, Result, ShareService,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How often the in-memory store drops expired snippets.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared handles injected into every route.
#[derive(Clone)]
pub struct AppState {
    pub share: Arc<ShareService>,
    pub pages: Arc<PageLoader>,
}

impl AppState {
    pub fn new(share: ShareService, pages: PageLoader) -> Self {
        Self {
            share: Arc::new(share),
            pages: Arc::new(pages),
        }
    }

    /// Build both stores from configuration. Must run inside a tokio runtime
    /// when the memory backend is selected, since it starts the sweeper.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let store: Arc<dyn KvStore> = match &config.ephemeral.backend {
            KvBackend::Memory => {
                info!("using in-memory snippet store");
                let kv = Arc::new(MemoryKv::new());
                kv.spawn_sweeper(SWEEP_INTERVAL);
                kv
            }
            KvBackend::Cloudflare {
                account_id,
                namespace_id,
                api_token,
                api_base,
            } => {
                info!(account_id = %account_id, namespace_id = %namespace_id, "using cloudflare kv snippet store");
                Arc::new(CloudflareKv::new(
                    api_base.as_str(),
                    account_id.as_str(),
                    namespace_id.as_str(),
                    api_token.as_str(),
                )?)
            }
        };

        let records = open_record_store(&config.durable.backend)?;
        let public_url = config.public_url();
        info!(public_url = %public_url, "share pages resolve against durable store");

        let share = ShareService::new(store, config.ttl());
        info!(ttl_secs = share.ttl().as_secs(), "snippets expire after ttl");

        Ok(Self::new(share, PageLoader::new(records, public_url)))
    }
}
