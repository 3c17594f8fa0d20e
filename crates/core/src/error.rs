use fontsheet_traits::FetchError;
use thiserror::Error;

/// Why a font family could not be resolved.
#[derive(Error, Debug, Clone)]
pub enum ResolutionError {
    #[error("Fetching stylesheet failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("no font family found for '{0}'")]
    NoFontFamily(String),
}
