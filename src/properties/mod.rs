//! Properties Module
//!
//! The property record and the data store it is loaded from.

mod model;
mod repository;

pub use model::Property;
pub use repository::{InMemoryPropertyRepository, PropertyRepository};
