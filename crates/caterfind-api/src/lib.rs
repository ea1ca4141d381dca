//! Remote authority for caterer availability and events.
//!
//! - [`CatererBackend`] - the operations the calendar consumes
//! - [`HttpBackend`] - the caterfind REST server
//! - [`InMemoryBackend`] - the same contract kept in process
//! - [`ApiError`] - error type shared by every backend
//!
//! ```text
//!  AvailabilityStore    EventStore
//!          │                 │
//!          └──── CatererBackend ────┐
//!                 │                 │
//!           HttpBackend      InMemoryBackend
//!                 │
//!           REST server
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use backend::{BoxFuture, CatererBackend, EventQuery, OwnerId};
pub use config::ApiConfig;
pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use http::HttpBackend;
pub use memory::{CallCounts, InMemoryBackend};
