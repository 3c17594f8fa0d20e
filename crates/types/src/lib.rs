pub mod family;
pub mod token;
pub mod variant;

pub use family::{FontFamilyResult, family_slug, strip_quotes};
pub use token::StylesheetToken;
pub use variant::Variant;
