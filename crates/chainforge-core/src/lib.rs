//! chainforge core - types and traits shared by every chainforge crate
//!
//! This crate provides:
//! - Score types for representing solution quality
//! - Domain traits and chained variable descriptors
//! - The supply layer: demand-cached inverse and anchor lookups

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{ChainValue, PlanningSolution, VariableDescriptor, VariableType};
pub use error::{Result, SolverForgeError};
pub use score::{Score, SimpleScore};
