//! Market data aggregate: raw benchmark payloads, normalized points and feeds.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
