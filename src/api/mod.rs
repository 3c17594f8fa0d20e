pub mod fonts;
pub mod health;

pub use fonts::{early_access, icons, invalidate_early_access, invalidate_icons};
pub use health::health_check;
