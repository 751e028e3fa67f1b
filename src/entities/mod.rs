//! Entity type definitions
//!
//! The catalog tracks three entity types:
//!
//! - [`ProprietaryApp`] - Proprietary products visitors want to replace
//! - [`Alternative`] - Open-source applications offered as replacements,
//!   each carrying [`CapabilityImplementation`] records with metadata
//! - [`Capability`] - Named features/functions shared across products

pub mod alternative;
pub mod capability;
pub mod proprietary;

pub use alternative::{Alternative, CapabilityImplementation};
pub use capability::Capability;
pub use proprietary::ProprietaryApp;
