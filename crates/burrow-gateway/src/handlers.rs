mod health;
mod url;

pub use health::health_handler;
pub use url::{create_url_handler, not_found_handler, resolve_url_handler};
