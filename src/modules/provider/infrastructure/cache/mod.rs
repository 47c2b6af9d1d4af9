mod details_cache;

pub use details_cache::{CacheStats, Clock, DetailsCache, ManualClock, SystemClock};
