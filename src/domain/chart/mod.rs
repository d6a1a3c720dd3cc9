//! Chart aggregate: axis domain, trend evaluation and hover state.

pub mod entities;
pub mod services;
pub mod state;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use state::*;
pub use value_objects::*;
