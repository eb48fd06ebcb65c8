//! Who may edit or delete what: the author and nobody else.

use super::Requester;
use crate::domain::Authored;
use crate::error::DomainError;

/// True iff the requester is authenticated and is the entity's author.
pub fn can_modify<E: Authored + ?Sized>(requester: Requester, entity: &E) -> bool {
    requester.is(entity.author_id())
}

pub fn ensure_can_modify<E: Authored + ?Sized>(
    requester: Requester,
    entity: &E,
    entity_type: &'static str,
) -> Result<(), DomainError> {
    if can_modify(requester, entity) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(entity_type))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Comment, Post};

    #[test]
    fn test_author_can_modify() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "t".to_string(), "b".to_string());
        let comment = Comment::new(post.id, author, "c".to_string());

        assert!(can_modify(Requester::User(author), &post));
        assert!(can_modify(Requester::User(author), &comment));
    }

    #[test]
    fn test_anonymous_cannot_modify() {
        let post = Post::new(Uuid::new_v4(), "t".to_string(), "b".to_string());
        assert!(!can_modify(Requester::Anonymous, &post));
    }

    #[test]
    fn test_other_user_cannot_modify() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "t".to_string(), "b".to_string());
        let comment = Comment::new(post.id, author, "c".to_string());
        let other = Requester::User(Uuid::new_v4());

        assert!(!can_modify(other, &post));
        assert!(!can_modify(other, &comment));
    }

    #[test]
    fn test_post_author_cannot_modify_others_comment() {
        let post_author = Uuid::new_v4();
        let post = Post::new(post_author, "t".to_string(), "b".to_string());
        let comment = Comment::new(post.id, Uuid::new_v4(), "c".to_string());

        assert!(!can_modify(Requester::User(post_author), &comment));
    }

    #[test]
    fn test_ensure_can_modify_reports_forbidden() {
        let post = Post::new(Uuid::new_v4(), "t".to_string(), "b".to_string());
        let result = ensure_can_modify(Requester::User(Uuid::new_v4()), &post, "post");
        assert!(matches!(result, Err(DomainError::Forbidden("post"))));
    }
}
