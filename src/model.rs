mod plans;

pub use plans::{NewPlan, Plan};
