// Review Pulse: two-period comparison of dated comment tables
//
// This is the library root. Each module corresponds to one stage of the
// comparison pipeline or one of the external models it depends on.

pub mod chart;
pub mod config;
pub mod error;
pub mod keywords;
pub mod output;
pub mod period;
pub mod pipeline;
pub mod sentiment;
pub mod table;
pub mod topics;
