//! Command Handlers
//!
//! Applies driver commands to a cache and builds their responses.

use tracing::{debug, warn};

use crate::cache::{Cache, CacheItem, EvictionPolicy};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DumpResponse, ErrorResponse, OutcomeResponse, Request, Response,
    SnapshotResponse, StatsResponse,
};

/// Driver state: the cache plus the policy used when a command names none.
#[derive(Debug)]
pub struct Session {
    cache: Cache,
    default_policy: EvictionPolicy,
}

impl Session {
    /// Creates a new Session around an existing cache.
    pub fn new(cache: Cache, default_policy: EvictionPolicy) -> Self {
        Self {
            cache,
            default_policy,
        }
    }

    /// Creates a new Session from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::from_config(config)?;
        Ok(Self::new(cache, config.default_policy))
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    // == Handle ==
    /// Applies one command.
    ///
    /// Rejected inserts and misses are successful responses; only invalid
    /// commands produce an error.
    pub fn handle(&mut self, req: Request) -> Result<Response> {
        if let Some(error_msg) = req.validate() {
            return Err(CacheError::InvalidRequest(error_msg));
        }

        let response = match req {
            Request::Insert { item, policy } => {
                let policy = policy
                    .as_deref()
                    .map(EvictionPolicy::from_marker)
                    .unwrap_or(self.default_policy);
                Response::Outcome(self.cache.insert(item, policy).into())
            }
            Request::Retrieve { id, header } => {
                let probe = CacheItem::key(id, header);
                Response::Outcome(self.cache.retrieve(&probe).into())
            }
            Request::Update { item } => Response::Outcome(self.cache.update(item).into()),
            Request::Clear => {
                self.cache.clear_all();
                Response::Cleared(ClearResponse::new(self.cache.shard_count()))
            }
            Request::Stats => Response::Stats(StatsResponse::from(self.cache.stats())),
            Request::Snapshot => Response::Snapshot(SnapshotResponse::from(self.cache.snapshot())),
            Request::Dump => Response::Dump(DumpResponse::new(self.cache.to_string())),
        };
        Ok(response)
    }

    // == Handle Line ==
    /// Parses and applies one JSON command line.
    ///
    /// Parse and validation failures become error responses.
    pub fn handle_line(&mut self, line: &str) -> Response {
        let result = serde_json::from_str::<Request>(line)
            .map_err(|e| CacheError::InvalidRequest(e.to_string()))
            .and_then(|req| {
                debug!("Handling request: {:?}", req);
                self.handle(req)
            });

        match result {
            Ok(response) => response,
            Err(err) => {
                warn!("Rejected command line: {}", err);
                Response::Error(ErrorResponse::from(&err))
            }
        }
    }
}
