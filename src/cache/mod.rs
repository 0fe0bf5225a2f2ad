//! Time-expiring cache and the cache-aside accessor built on it.

mod accessor;
mod expiring;

pub use accessor::CacheAside;
pub use expiring::ExpiringCache;
