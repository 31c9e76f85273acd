//! Iterative-deepening depth-first search.
//!
//! A depth-limited DFS restarted with a growing limit.  Finds *a* path with
//! few hops, not the shortest by distance — useful as a cross-check against
//! A* and as a planner on graphs where the geographic heuristic is useless.
//! Unlike A*, no side-entry filtering is applied: the raw successor sets
//! are explored as-is.

use log::info;

use wp_core::SectionId;
use wp_graph::SectionGraph;

use crate::error::{PlanError, PlanResult};
use crate::planner::{Planner, Route};

/// Iterative-deepening DFS planner.
///
/// Depth limits are tried in `min_depth..max_depth` (exclusive end); a goal
/// further than `max_depth` hops from the start yields
/// [`PlanError::NoRoute`] even when a longer path exists.
pub struct IterativeDeepeningPlanner {
    pub min_depth: usize,
    pub max_depth: usize,
}

impl Default for IterativeDeepeningPlanner {
    fn default() -> Self {
        Self { min_depth: 8, max_depth: 64 }
    }
}

impl Planner for IterativeDeepeningPlanner {
    fn plan(
        &self,
        graph: &SectionGraph,
        start: SectionId,
        goal: SectionId,
    ) -> PlanResult<Route> {
        if start == goal {
            return Ok(Route { sections: vec![start], length_m: 0.0 });
        }

        info!(
            "planning a route from {} to {} with IDDFS (max depth {})",
            graph.name(start),
            graph.name(goal),
            self.max_depth
        );

        let mut on_path = vec![false; graph.section_count()];
        let mut path = Vec::new();
        for limit in self.min_depth..self.max_depth {
            if dfs(graph, start, goal, limit, 0, &mut path, &mut on_path) {
                info!("found a route with {} sections at depth limit {limit}", path.len());
                // Accumulated cost of every section left on the way to the
                // goal — the goal itself is not traversed.
                let length_m = path[..path.len() - 1]
                    .iter()
                    .map(|&s| graph.section(s).length_m)
                    .sum();
                return Ok(Route { sections: path, length_m });
            }
            debug_assert!(path.is_empty());
        }

        Err(PlanError::NoRoute {
            from: graph.name(start),
            to: graph.name(goal),
        })
    }
}

/// Depth-limited DFS.  On success `path` holds the full route including
/// `current` and the goal; on failure it is left as it was entered.
fn dfs(
    graph: &SectionGraph,
    current: SectionId,
    goal: SectionId,
    limit: usize,
    depth: usize,
    path: &mut Vec<SectionId>,
    on_path: &mut [bool],
) -> bool {
    let successors = graph.successors(current);

    // The goal one hop away ends the search regardless of the limit.
    if successors.binary_search(&goal).is_ok() {
        path.push(current);
        path.push(goal);
        return true;
    }
    if depth > limit {
        return false;
    }

    path.push(current);
    on_path[current.index()] = true;
    for &m in successors {
        if on_path[m.index()] {
            continue;
        }
        if dfs(graph, m, goal, limit, depth + 1, path, on_path) {
            return true;
        }
    }
    on_path[current.index()] = false;
    path.pop();
    false
}
