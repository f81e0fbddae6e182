//! # u-backhaul
//!
//! Vehicle routing with backhauls: a capacity-limited fleet serves linehaul
//! (delivery) customers and then backhaul (pickup) customers on routes that
//! start and end at a single depot. Solutions are built by a round-robin
//! constructive heuristic and improved by simulated annealing over swap and
//! relocate moves.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (Node, Fleet, Instance, Route, Solution)
//! - [`distance`]: Euclidean distance matrix and route costing
//! - [`evaluation`]: Precedence, capacity, cost and coverage checks
//! - [`constructive`]: Round-robin initial solution
//! - [`local_search`]: Swap and relocate moves, weighted neighborhood
//! - [`annealing`]: Simulated annealing with best-solution tracking
//! - [`io`]: Instance reader and solution writer
//! - [`config`]: TOML run configuration
//! - [`solver`]: End-to-end solve

pub mod annealing;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod solver;
