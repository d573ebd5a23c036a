pub mod config;
pub mod merge;

mod engine;
mod error;
mod providers;

#[cfg(test)]
mod tests;

pub use engine::{DecorationId, MezzoCore};
pub use error::{Error, Result};
pub use providers::ProviderRegistry;

pub use mezzo_types::*;
