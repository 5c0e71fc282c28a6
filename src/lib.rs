pub mod cuts;
pub mod error;
pub mod guillotine;
pub mod plan;
pub mod report;
pub mod solver;
pub mod types;

pub use error::PlanError;
pub use plan::{CutPlan, PieceRequest, compute_cut_plan};
