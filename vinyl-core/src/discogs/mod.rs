mod client;
mod models;
pub use client::{DiscogsClient, DiscogsError, DEFAULT_BASE_URL};
pub use models::{MasterRecord, ReleaseSummary, NOT_AVAILABLE, UNTITLED};
