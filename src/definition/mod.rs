pub mod artifact;
pub mod conversion;
pub mod schema;

pub use artifact::*;
pub use conversion::*;
pub use schema::*;
