//! Loading the store from the external seed feed.

mod feed;
mod initialize_endpoint;
mod loader;
#[cfg(test)]
pub(crate) mod test_feed;

pub use feed::FeedClient;
pub use initialize_endpoint::initialize_data_endpoint;
pub use loader::reinitialize;
