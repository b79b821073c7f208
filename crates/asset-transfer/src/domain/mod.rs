//! # Domain Layer
//!
//! Pure chaincode concepts. No I/O, no async.

pub mod entities;
pub mod response;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use response::*;
pub use services::*;
pub use value_objects::*;
