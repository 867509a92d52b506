//! Core types - value objects shared by entries, configurations and output.

mod frequency;
mod priority;
mod url;

pub use frequency::ChangeFrequency;
pub use priority::Priority;
pub use self::url::{BaseUrl, MAX_LOCATION_LEN, resolve_location};
