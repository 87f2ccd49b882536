//! Wire types and pure business rules shared by the sales order client.
//!
//! Nothing in this crate performs I/O: the frontend owns transport and
//! rendering, this crate owns the shape of the data and the rules applied
//! to it before anything is sent.

pub mod domain;
pub mod shared;
