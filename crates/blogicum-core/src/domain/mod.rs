//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod post;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use location::Location;
pub use post::{Post, PostEntry, PostFilter};
pub use user::User;

use uuid::Uuid;

/// Entities owned by exactly one user.
pub trait Authored {
    fn author_id(&self) -> Uuid;
}
