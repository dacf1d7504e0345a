/// Plan CRUD endpoints
pub mod plans;
/// Manual reminder trigger
pub mod reminders;
