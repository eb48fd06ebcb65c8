//! Validated form values.
//!
//! Each `clean` runs every field rule before returning, so the caller can
//! re-render the whole form at once.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{Comment, Post, User};
use crate::error::{DomainError, FieldError};

const REQUIRED: &str = "This field is required";

/// Post fields as submitted by its author.
#[derive(Debug, Clone, Validate)]
pub struct PostDraft {
    #[validate(custom(function = "required"), length(max = 256))]
    pub title: String,
    #[validate(custom(function = "required"))]
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub image: Option<String>,
}

impl PostDraft {
    pub fn clean(mut self) -> Result<Self, DomainError> {
        self.title = self.title.trim().to_string();
        self.image = non_blank(self.image);
        self.validate().map_err(invalid)?;
        Ok(self)
    }

    /// Build a new post owned by `author_id`.
    pub fn into_post(self, author_id: Uuid) -> Post {
        let mut post = Post::new(author_id, String::new(), String::new());
        self.apply_to(&mut post);
        post
    }

    /// Overwrite the editable fields. Author and creation time are untouched.
    pub fn apply_to(self, post: &mut Post) {
        post.title = self.title;
        post.text = self.text;
        post.pub_date = self.pub_date;
        post.is_published = self.is_published;
        post.category_id = self.category_id;
        post.location_id = self.location_id;
        post.image = self.image;
    }
}

#[derive(Debug, Clone, Validate)]
pub struct CommentDraft {
    #[validate(custom(function = "required"))]
    pub text: String,
}

impl CommentDraft {
    pub fn clean(self) -> Result<Self, DomainError> {
        self.validate().map_err(invalid)?;
        Ok(self)
    }

    pub fn into_comment(self, post_id: Uuid, author_id: Uuid) -> Comment {
        Comment::new(post_id, author_id, self.text)
    }
}

/// Editable profile fields. A blank email clears the address.
#[derive(Debug, Clone, Validate)]
pub struct ProfileChanges {
    #[validate(custom(function = "username"), length(max = 150))]
    pub username: String,
    #[validate(length(max = 150))]
    pub first_name: String,
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
}

impl ProfileChanges {
    pub fn clean(mut self) -> Result<Self, DomainError> {
        self.username = self.username.trim().to_string();
        self.email = non_blank(self.email);
        self.validate().map_err(invalid)?;
        Ok(self)
    }

    pub fn apply_to(self, user: &mut User) {
        user.username = self.username;
        user.first_name = self.first_name;
        user.last_name = self.last_name;
        user.email = self.email.unwrap_or_default();
        user.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(custom(function = "username"), length(max = 150))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl Registration {
    pub fn clean(mut self) -> Result<Self, DomainError> {
        self.username = self.username.trim().to_string();
        self.email = non_blank(self.email);
        self.validate().map_err(invalid)?;
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(REQUIRED)));
    }
    Ok(())
}

fn username(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !value.chars().all(allowed) {
        return Err(ValidationError::new("username").with_message(Cow::Borrowed(
            "Only letters, digits and @/./+/-/_ are allowed",
        )));
    }
    Ok(())
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match (&*error.code, error.params.get("max")) {
        ("length", Some(max)) => format!("Ensure this value has at most {max} characters"),
        _ => format!("Invalid value ({})", error.code),
    }
}

/// Flatten validator output into field errors, ordered by field name.
fn invalid(errors: ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let problems = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| FieldError::new(field.clone(), describe(e)))
        })
        .collect();
    DomainError::Validation(problems)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "  Trip to Samara ".to_string(),
            text: "We went.".to_string(),
            pub_date: Utc::now(),
            is_published: true,
            category_id: None,
            location_id: None,
            image: Some("  ".to_string()),
        }
    }

    fn profile() -> ProfileChanges {
        ProfileChanges {
            username: "ivan.petrov".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            email: Some(String::new()),
        }
    }

    fn problems(err: DomainError) -> Vec<FieldError> {
        match err {
            DomainError::Validation(errors) => errors,
            other => panic!("unexpected error: {other}"),
        }
    }

    fn fields(err: DomainError) -> Vec<String> {
        problems(err).into_iter().map(|e| e.field.into_owned()).collect()
    }

    fn messages(err: DomainError) -> Vec<String> {
        problems(err).into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_post_draft_is_normalized() {
        let draft = draft().clean().unwrap();
        assert_eq!(draft.title, "Trip to Samara");
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_post_draft_reports_every_field() {
        let mut bad = draft();
        bad.title = "x".repeat(257);
        bad.text = "   ".to_string();

        assert_eq!(
            problems(bad.clean().unwrap_err()),
            vec![
                FieldError::new("text", "This field is required"),
                FieldError::new("title", "Ensure this value has at most 256 characters"),
            ]
        );
    }

    #[test]
    fn test_long_image_rejected() {
        let mut bad = draft();
        bad.image = Some("i".repeat(256));
        assert_eq!(fields(bad.clean().unwrap_err()), vec!["image"]);
    }

    #[test]
    fn test_apply_keeps_author() {
        let author = Uuid::new_v4();
        let mut post = draft().clean().unwrap().into_post(author);
        let created_at = post.created_at;

        let mut edit = draft();
        edit.title = "Edited".to_string();
        edit.is_published = false;
        edit.clean().unwrap().apply_to(&mut post);

        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.title, "Edited");
        assert!(!post.is_published);
    }

    #[test]
    fn test_empty_comment_rejected() {
        let err = CommentDraft {
            text: "\n ".to_string(),
        }
        .clean()
        .unwrap_err();
        assert_eq!(fields(err), vec!["text"]);
    }

    #[test]
    fn test_profile_rules() {
        let ok = profile().clean().unwrap();
        assert_eq!(ok.email, None);

        let bad = ProfileChanges {
            username: "ivan petrov".to_string(),
            email: Some("ivan@".to_string()),
            ..profile()
        };
        assert_eq!(fields(bad.clean().unwrap_err()), vec!["email", "username"]);
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for email in ["a b@example.com", "a@example..com", "@example.com", "plain"] {
            let bad = ProfileChanges {
                email: Some(email.to_string()),
                ..profile()
            };
            assert_eq!(
                problems(bad.clean().unwrap_err()),
                vec![FieldError::new("email", "Enter a valid email address")],
                "{email}"
            );
        }
    }

    #[test]
    fn test_blank_username_required() {
        let bad = ProfileChanges {
            username: "  ".to_string(),
            ..profile()
        };
        assert_eq!(messages(bad.clean().unwrap_err()), vec!["This field is required"]);
    }

    #[test]
    fn test_registration_password_length() {
        let err = Registration {
            username: "reader".to_string(),
            email: Some("reader@example.com".to_string()),
            password: "short".to_string(),
        }
        .clean()
        .unwrap_err();
        assert_eq!(fields(err), vec!["password"]);
    }
}
