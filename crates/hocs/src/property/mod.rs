//! Property records and the address → record lookup boundary.

pub mod address;
pub mod domain;
pub mod geography;
pub mod source;
pub mod utilities;

pub use address::{AddressError, NormalizedAddress};
pub use domain::{PropertyRecord, PropertyValidationError, WildfireZone};
pub use geography::{Gazetteer, Location, UnsupportedArea};
pub use source::{LookupError, PropertyDataSource, SyntheticPropertySource};
pub use utilities::{assign_utilities, UtilityAssignment, UtilityKind, UtilityProvider};
