//! A classical STRIPS planner: grounding, Graphplan with mutex analysis, the relaxed planning
//! graph / h_FF heuristic, enforced hill climbing, and a pair of uninformed baseline searches.
//!
//! ```
//! use strips_planner::schema::{ActionSchema, PredTemplate, PredicateSchema, ProblemSpec};
//! use strips_planner::{Cfg, GroundProblem};
//!
//! let spec = ProblemSpec {
//!     objects: vec!["cake".into()],
//!     predicates: vec![
//!         PredicateSchema::new("have", ["?x"]),
//!         PredicateSchema::new("eaten", ["?x"]),
//!     ],
//!     actions: vec![ActionSchema::new(
//!         "eat",
//!         ["?x"],
//!         vec![PredTemplate::of("have", ["?x"])],
//!         vec![PredTemplate::of("eaten", ["?x"])],
//!         vec![PredTemplate::of("have", ["?x"])],
//!     )
//!     .unwrap()],
//!     init: vec![("have".into(), vec!["cake".into()])],
//!     goal: vec![("eaten".into(), vec!["cake".into()])],
//! };
//!
//! let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();
//! let plan = strips_planner::ehc::search(&problem).expect("solvable");
//! assert!(strips_planner::plan::validate_sequential(&plan, &problem));
//! ```

pub mod baseline;
pub mod catalog;
pub mod config;
pub mod ehc;
pub mod error;
pub mod graphplan;
pub mod grounder;
pub mod intern;
pub mod plan;
pub mod rpg;
pub mod schema;
pub mod state;

pub use config::Cfg;
pub use error::Error;
pub use grounder::GroundProblem;
