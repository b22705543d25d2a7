//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "isbn is required"))]
    pub isbn: String,
}

/// Update book request. The ISBN is immutable once registered.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
}

/// Book search parameters (query-by-example, each field matched as a
/// case-insensitive substring)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_book_rejects_empty_fields() {
        let request = CreateBook {
            title: String::new(),
            author: "Ann Author".to_string(),
            isbn: "123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_book_accepts_complete_request() {
        let request = CreateBook {
            title: "My Book".to_string(),
            author: "Ann Author".to_string(),
            isbn: "123".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
