//! Batch conversion of census and reimbursement reference tables into the
//! layouts consumed by the simulation's geography loaders.

pub mod adjustments;
pub mod config;
pub mod demographics;
pub mod error;
pub mod numeric;
pub mod table;
