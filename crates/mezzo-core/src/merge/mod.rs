mod collection;
mod combine;

pub use collection::{CompositeEntry, Merge, ResultCollection};
pub use combine::{CombineOutcome, can_combine, provider_rank};
