//! Typography and page geometry: measurement units, the element style
//! table, and page margins.
//!
//! Values are stored in WordprocessingML units (half-points for font
//! sizes, twentieths of a point for lengths) and read from configuration in
//! points and centimeters.

mod page;
mod profile;
mod units;

pub use page::{BindingSide, PageGeometry, PageMargins, ResolvedMargins};
pub use profile::{Alignment, StyleProfile, StyleTable};
pub use units::{HalfPoints, LineSpacing, Twips};
