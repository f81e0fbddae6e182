//! Domain model types for vehicle routing with backhauls.
//!
//! Provides the core abstractions: depot and customer nodes, a homogeneous
//! fleet, the read-only problem instance, routes as ordered customer
//! sequences with cached loads and cost, and solutions.

mod fleet;
mod instance;
mod node;
mod route;
mod solution;

pub use fleet::Fleet;
pub use instance::{Instance, InstanceError};
pub use node::{Node, NodeKind};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
