//! Domain model traits and chained variable metadata

pub mod supply;
mod traits;
mod value;
mod variable;


pub use traits::PlanningSolution;
pub use value::ChainValue;
pub use variable::{VariableDescriptor, VariableType};
