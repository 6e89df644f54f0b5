//! Driver Module
//!
//! Line-oriented command front end for the cache.
//!
//! # Commands
//! - `insert` - Insert an item with an optional eviction policy
//! - `retrieve` - Check for an item by id and header
//! - `update` - Replace a cached item
//! - `clear` - Empty every shard
//! - `stats` - Aggregated statistics
//! - `snapshot` - Structured shard contents
//! - `dump` - Human-readable shard contents

pub mod handlers;
pub mod stream;

pub use handlers::Session;
pub use stream::run;
