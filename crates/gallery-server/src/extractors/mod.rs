//! Request extractors

pub mod body;
pub mod query;

pub use body::JsonBody;
pub use query::QueryPairs;
