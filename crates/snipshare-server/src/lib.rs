//! warp HTTP surface for snipshare.

pub mod api;
pub mod server;

pub use server::http_server::{routes, start_server};
pub use server::state::AppState;
