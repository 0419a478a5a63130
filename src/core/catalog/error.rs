//=========================================================================
// Catalog Errors
//=========================================================================
//
// Load-time failures for the state catalog. A failed load leaves the
// machine without a catalog; it never aborts the process.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== CatalogError ========================================================

/// Errors raised while loading and validating a state catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configuration source could not be read from disk.
    #[error("catalog source {path} could not be read: {source}")]
    NotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration source is not valid JSON.
    #[error("catalog source is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but fails structural validation
    /// (empty state table, missing default state, malformed definition).
    #[error("catalog rejected: {0}")]
    Invalid(String),
}
