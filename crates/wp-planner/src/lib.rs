//! `wp-planner` — route planning over the section graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`planner`] | `Planner` trait, `Route`, `SearchTrace`                 |
//! | [`astar`]   | `AstarPlanner` — shortest-distance A*                   |
//! | [`iterdeep`]| `IterativeDeepeningPlanner` — depth-limited DFS         |
//! | [`side`]    | The side-entry rule (`Side`, `entered_side`, …)         |
//! | [`error`]   | `PlanError`, `PlanResult<T>`                            |

pub mod astar;
pub mod error;
pub mod iterdeep;
pub mod planner;
pub mod side;


pub use astar::AstarPlanner;
pub use error::{PlanError, PlanResult};
pub use iterdeep::IterativeDeepeningPlanner;
pub use planner::{Planner, Route, SearchTrace};
pub use side::{Side, entered_side, may_exit_into};
