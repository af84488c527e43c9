//! Normalized models
//!
//! Typed output of the Schema.org converter: the entity union, the embedded
//! value objects, and the diagnostics collected along the way.

pub mod diagnostic;
pub mod entity;
pub mod value;

pub use diagnostic::{Diagnostic, INVALID_TYPE_REASON};
pub use entity::{
    Agent, EntityType, Event, NormalizedEntity, Organization, Person, Product, Provenance,
    is_of_type,
};
pub use value::{Address, Coordinates, Image, Offer, Place, Price, Weight};
