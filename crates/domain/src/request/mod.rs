//! Backend API request types

mod endpoints;
mod method;
mod spec;

pub use endpoints::{ApiBase, CloneTarget, IssueQuery};
pub use method::HttpMethod;
pub use spec::ApiRequest;
