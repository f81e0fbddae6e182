//! Constructive heuristics for building initial backhaul routing solutions.
//!
//! - [`round_robin`]: shuffled round-robin dealing of linehauls then
//!   backhauls, O(n × m)

mod round_robin;

pub use round_robin::round_robin;
