mod color;
mod region;
mod validation;

pub use color::{random_color, random_rgb, Rgb, PALETTE};
pub use region::{NewRegion, Region};
pub use validation::{AreaGauge, AreaLimit, Validation};
