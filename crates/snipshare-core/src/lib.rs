//! Core of snipshare: write-once code snippets behind shareable ids.
//!
//! Two independent read paths live here. [`share::ShareService`] writes and
//! reads snippets in an ephemeral key-value store with a fixed time-to-live,
//! and [`page::PageLoader`] reads `{title, code}` records from a durable
//! record store for the share page.

pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod page;
pub mod records;
pub mod share;

// Re-export common items for convenience
pub use config::{get_config_dir, get_config_file_path, get_port_file_path, Config};
pub use error::{
    ConfigError, PageError, RecordError, Result, ShareError, SnipshareError, StoreError,
};
pub use kv::{CloudflareKv, KvStore, MemoryKv};
pub use models::{
    CodeProjection, CodeRecord, CreateRequest, CreateResponse, PageData, Snippet, SnippetId,
};
pub use page::PageLoader;
pub use records::{open_record_store, FileRecordStore, PocketBaseStore, RecordStore};
pub use share::{ShareService, DEFAULT_TTL};
