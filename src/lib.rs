//! Shard Cache - A sharded in-memory object cache
//!
//! Routes items to fixed, independent shards by a header hash. Each shard
//! enforces its own size budget with LRU or MRU eviction.

pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;

pub use cache::{Cache, CacheItem, CacheList, EvictionPolicy, Outcome};
pub use config::Config;
pub use driver::Session;
pub use error::{CacheError, Result};
