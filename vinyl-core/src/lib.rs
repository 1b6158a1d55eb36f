//! Barcode lookup against the Discogs catalog and Markdown export of the
//! result, merged with personal notes about the copy.
//!
//! - `discogs`: barcode search and master resolution
//! - `lookup`: the search-then-resolve pipeline
//! - `document`: front matter composition and export
pub mod annotation;
pub mod barcode;
pub mod config;
pub mod discogs;
pub mod document;
pub mod lookup;

pub use annotation::{AcquisitionOrigin, Annotation, Condition, ParseAnnotationError};
pub use config::{Config, ConfigError};
pub use discogs::{DiscogsClient, DiscogsError, MasterRecord, ReleaseSummary};
pub use document::{compose, document_filename, ComposedDocument};
pub use lookup::{lookup, Lookup, LookupError};
