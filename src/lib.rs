pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod paths;
pub mod query;
pub mod routes;
pub mod schema;
mod serde_utils;
pub mod util;

#[cfg(test)]
mod test_utils;

pub mod prelude {
    pub use crate::client::NewsClient;
    pub use crate::error::ClientError;
    pub use crate::models::{News, NewsHead, NewsPage, SortOrder, SourceCatalog};
    pub use crate::query::{NewsFilter, PageOptions};
    pub use crate::routes::Route;
}
