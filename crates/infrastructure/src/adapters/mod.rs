//! Adapters for the application ports.

mod reqwest_client;
mod url_location;

pub use reqwest_client::ReqwestApiClient;
pub use url_location::UrlLocation;
