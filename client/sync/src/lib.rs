pub mod search;
pub mod toggle;

pub use search::{SearchAggregator, SearchBox, SearchResults};
pub use toggle::{ToggleController, ToggleOutcome, ToggleState};
