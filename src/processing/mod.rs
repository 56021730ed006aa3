//! Batch-size decisions: resolution, validation, memory adjustment and
//! pagination arithmetic.

pub mod batch;
pub mod memory;
