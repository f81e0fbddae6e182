//! Random neighborhood moves for backhaul routing solutions.
//!
//! - [`swap`]: exchange two same-kind customers across routes
//! - [`relocate`]: move one customer to another route
//!
//! Every move validates capacity and precedence before mutating, refreshes
//! the cached costs of the routes it touches, and leaves the solution
//! untouched when it reports failure.

mod neighborhood;
mod relocate;
mod swap;

pub use neighborhood::{MoveConfig, MoveKind, MoveSampler, Neighborhood};
pub use relocate::relocate;
pub use swap::swap;
