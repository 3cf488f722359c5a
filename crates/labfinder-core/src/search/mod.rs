//! Lab search: the pending-search cache, the lab model, and the client-side
//! sort/filter over a loaded results list.

pub mod intent;
pub mod model;
pub mod results;
pub mod service;

pub use intent::{IntentCache, PENDING_SEARCH_KEY};
pub use model::{Lab, SearchIntent};
pub use results::{DistanceFilter, LabResults, SortOption};
pub use service::LabDirectory;
