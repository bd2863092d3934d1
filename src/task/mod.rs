pub mod condition;
pub mod node;
pub mod value;

pub use condition::*;
pub use node::*;
pub use value::*;
