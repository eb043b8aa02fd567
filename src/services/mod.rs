pub mod clock;
pub mod planner;
pub mod selection;
pub mod store;
