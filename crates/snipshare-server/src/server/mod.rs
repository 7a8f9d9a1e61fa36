pub mod http_server;
pub mod state;
pub mod utils;

pub use http_server::start_server;
