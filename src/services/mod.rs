//! File and network services
//!
//! - Workshop record parsing and writing
//! - Persistent title cache
//! - Workshop page lookups and title resolution
//! - Background title workers

pub mod title_cache;
pub mod title_lookup;
pub mod title_resolver;
pub mod title_worker;
pub mod workshop;

pub use title_cache::{SharedTitleCache, TitleCache};
pub use title_lookup::{SteamWorkshopLookup, TitleLookup};
pub use title_worker::TitleWorkers;
