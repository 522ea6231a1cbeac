// Comparison pipeline: the orchestrator and the report it produces.

pub mod compare;
pub mod report;
