//! # Blogicum Shared
//!
//! Request and response types of the Blogicum HTTP interface.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, FieldProblem};
