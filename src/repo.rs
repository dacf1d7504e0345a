mod plans;

pub use plans::{PgPlanRepo, PlanRepo};
