//! # Blogicum Core
//!
//! The domain layer of the Blogicum blog.
//! Entities, the visibility and authorization policies, pagination and form
//! validation live here with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod policy;
pub mod ports;

pub use error::{DomainError, FieldError, RepoError};
pub use pagination::{Page, Paginator};
pub use policy::Requester;
