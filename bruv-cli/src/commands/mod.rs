//! CLI command implementations

pub mod compare;

pub use compare::CompareArgs;
