pub mod api_error;
pub mod traits;

#[cfg(feature = "memory-store")]
pub mod memory;

#[cfg(feature = "http-store")]
pub mod rest;

pub use api_error::{format_api_error, format_transport_error};
pub use traits::{EntityStore, StoreScope, Stores};

#[cfg(feature = "memory-store")]
pub use memory::{MemoryStore, MemoryStores, ScopeFilter};

#[cfg(feature = "http-store")]
pub use rest::RestStore;
