use crate::annotation::Annotation;
use crate::barcode::normalize_barcode;
use crate::discogs::{DiscogsClient, DiscogsError, MasterRecord, ReleaseSummary};
use crate::document::{compose, ComposedDocument};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("A Discogs API token is required")]
    MissingToken,
    #[error("A barcode is required")]
    MissingBarcode,
    #[error(transparent)]
    Catalog(#[from] DiscogsError),
}

impl LookupError {
    /// Zero matches is informational, not a failure of the lookup itself.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::Catalog(DiscogsError::NotFound(_)))
    }
}

/// Result of one barcode lookup.
///
/// The caller keeps this between showing the release and exporting the
/// document; nothing is cached inside the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub release: ReleaseSummary,
    pub master: Option<MasterRecord>,
}

impl Lookup {
    pub fn compose(&self, annotation: &Annotation) -> ComposedDocument {
        compose(&self.release, self.master.as_ref(), annotation)
    }
}

/// Search by barcode, then resolve the master of the first match.
///
/// Search failures abort before any master request. Master failures only
/// leave `master` empty.
pub async fn lookup(
    client: &DiscogsClient,
    barcode: &str,
    token: &str,
) -> Result<Lookup, LookupError> {
    if token.trim().is_empty() {
        return Err(LookupError::MissingToken);
    }
    if normalize_barcode(barcode).is_empty() {
        return Err(LookupError::MissingBarcode);
    }
    let release = client.search_by_barcode(barcode, token).await?;
    info!("Found release: {}", release.title);
    let master = client.resolve_master(release.master(), token).await;
    if master.is_none() {
        info!("No master data for {}", release.title);
    }
    Ok(Lookup { release, master })
}
