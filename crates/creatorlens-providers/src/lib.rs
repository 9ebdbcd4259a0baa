//! Provider adapters and the fallback manager for creator profile lookups.
//!
//! Each adapter wraps one third-party data vendor and maps its proprietary
//! payload into [`creatorlens_core::StandardizedProfile`]. The
//! [`ProviderManager`] tries eligible adapters in priority order and returns
//! the first success, short-circuiting on user errors (nonexistent or
//! private account) that no other vendor can fix.

pub mod adapter;
pub mod ensembledata;
pub mod manager;
pub mod nanoinfluencer;

pub use adapter::{ProviderAdapter, ProviderStatus};
pub use ensembledata::EnsembledataAdapter;
pub use manager::ProviderManager;
pub use nanoinfluencer::NanoinfluencerAdapter;
