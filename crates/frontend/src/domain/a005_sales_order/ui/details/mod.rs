//! Sales order form
//!
//! - cascade.rs: division → {SO type, customer} selector state
//! - model.rs: form values and their conversions
//! - view_model.rs: signals and commands
//! - page.rs: Leptos components

pub mod cascade;
mod model;
mod page;
mod view_model;

pub use page::SalesOrderDetails;
pub use view_model::SalesOrderDetailsVm;
