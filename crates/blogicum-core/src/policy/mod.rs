//! Visibility and authorization policy.
//!
//! Every function here is pure: the requester and the current time are passed
//! in explicitly and nothing is read from request or session state.

mod authorization;
mod visibility;

use uuid::Uuid;

pub use authorization::{can_modify, ensure_can_modify};
pub use visibility::{
    category_is_published, is_publicly_visible, is_released, is_visible, newest_first,
    oldest_first, visible_comments, visible_posts,
};

/// Who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requester {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Requester {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Requester::Anonymous => None,
            Requester::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Requester::User(_))
    }

    /// True when the requester is the given user.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}

impl From<Option<Uuid>> for Requester {
    fn from(user_id: Option<Uuid>) -> Self {
        user_id.map_or(Requester::Anonymous, Requester::User)
    }
}
