//! Solution writer.
//!
//! The first line reads `cost customers routes seconds[s]`. Each following
//! line describes one vehicle route as hyphen-joined stops (`Base` for the
//! depot, `L<id>` for linehauls, `B<id>` for backhauls) followed by the route
//! cost and the load it carries. Empty routes print as `Base-Base`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::models::{Instance, NodeKind, Route, Solution};

/// Renders a solution in the `.out` format, without a trailing newline.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_backhaul::io::format_solution;
/// use u_backhaul::models::{Fleet, Instance, Node, Route, Solution};
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(4, 3.0, 4.0, 10),
///         Node::backhaul(9, 0.0, 4.0, 5),
///     ],
///     Fleet::new(2, 20),
/// )
/// .unwrap();
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(vec![1, 2], &inst));
/// sol.add_route(Route::new());
/// sol.resum_cost();
///
/// let text = format_solution(&sol, &inst, Duration::from_millis(1500));
/// assert_eq!(
///     text,
///     "12.00 2 2 1.500000[s]\nBase-L4-B9-Base 12.00 15\nBase-Base 0.00 0"
/// );
/// ```
pub fn format_solution(solution: &Solution, instance: &Instance, elapsed: Duration) -> String {
    let mut lines = Vec::with_capacity(solution.num_routes() + 1);
    lines.push(format!(
        "{:.2} {} {} {:.6}[s]",
        solution.total_cost(),
        solution.num_served(),
        solution.num_routes(),
        elapsed.as_secs_f64()
    ));
    for route in solution.routes() {
        lines.push(format_route(route, instance));
    }
    lines.join("\n")
}

fn format_route(route: &Route, instance: &Instance) -> String {
    let stops: Vec<String> = route
        .path(instance.depot())
        .map(|idx| {
            let node = instance.node(idx);
            match node.kind() {
                NodeKind::Depot => "Base".to_string(),
                NodeKind::Linehaul => format!("L{}", node.id()),
                NodeKind::Backhaul => format!("B{}", node.id()),
            }
        })
        .collect();

    let mut line = stops.join("-");
    // Writing to a String cannot fail.
    let _ = write!(line, " {:.2} {}", route.cost(), route.used());
    line
}

/// Writes [`format_solution`] output to `path`, creating parent directories.
pub fn write_solution_file(
    path: impl AsRef<Path>,
    solution: &Solution,
    instance: &Instance,
    elapsed: Duration,
) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format_solution(solution, instance, elapsed))?;
    debug!(path = %path.display(), "solution written");
    Ok(())
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionSummary {
    pub instance: String,
    pub total_cost: f64,
    pub initial_cost: f64,
    pub customers: usize,
    pub routes: usize,
    /// External ids of customers left out of every route.
    pub unassigned: Vec<i64>,
    pub seed: u64,
    pub elapsed_seconds: f64,
}

impl SolutionSummary {
    pub fn new(
        name: impl Into<String>,
        solution: &Solution,
        instance: &Instance,
        initial_cost: f64,
        seed: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            instance: name.into(),
            total_cost: solution.total_cost(),
            initial_cost,
            customers: solution.num_served(),
            routes: solution.num_routes(),
            unassigned: solution
                .unassigned()
                .iter()
                .map(|&idx| instance.node(idx).id())
                .collect(),
            seed,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }
}
