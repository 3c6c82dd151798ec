//! Business logic services

pub mod memories;
pub mod texts;

pub use memories::{CdnLocation, MemoryService};
pub use texts::TextService;
