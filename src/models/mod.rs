pub mod form;
pub mod trip;
