pub mod cache;
pub mod resume;

pub use cache::{CacheInfo, ClearCacheRequest, ClearCacheResponse, ParseResumeResponse};
pub use resume::Resume;
