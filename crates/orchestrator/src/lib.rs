//! Product orchestration.
//!
//! [`ProductOrchestrator`] sequences calls to four independent stores:
//!
//! - create: blob, then metadata row, then cache entry, then event
//! - read image: cache entry, then blob
//! - delete: metadata lookup, then blob, then metadata row
//!
//! Nothing is rolled back. A blob written before a failed metadata insert is
//! left behind, and deletes do not touch the cache.

pub mod builder;
pub mod error;
pub mod metrics;
pub mod orchestrator;

pub use builder::{BuildError, OrchestratorBuilder};
pub use error::OrchestratorError;
pub use metrics::{MetricsSnapshot, OrchestratorMetrics};
pub use orchestrator::{CreatedProduct, ProductImage, ProductOrchestrator};
