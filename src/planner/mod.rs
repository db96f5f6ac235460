//! Query Planner subsystem for musicat
//!
//! Picks one of five access paths for a music search: the (title, album)
//! primary key or one of the single-attribute secondary indexes on artist,
//! title, album and year. Attributes not covered by the chosen key become a
//! conjunctive residual filter.
//!
//! # Design Principles
//!
//! - Deterministic: Same inputs → same plan
//! - Bounded: empty criteria never turn into a full scan
//! - Auditable: selection is an ordered table of rules, see [`PLAN_RULES`]
//!
//! # Index Selection Priority (strict order)
//!
//! 1. Title + album (primary key)
//! 2. Single attribute alone
//! 3. Artist > title > album > year, with residual filter

mod criteria;
mod errors;
mod explain;
mod plan;
mod planner;
mod rules;

pub use criteria::{ResolvedCriteria, SearchCriteria, SearchField, YearInput};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult};
pub use explain::ExplainPlan;
pub use plan::{AccessPath, AccessPlan};
pub use planner::QueryPlanner;
pub use rules::{Action, Guard, PlanRule, PLAN_RULES};
