pub mod endpoints;
pub mod models;

pub use endpoints::{create_snippet, fetch_snippet, page_data};
pub use models::FetchQuery;
