//! API handlers for the REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run DTO validation, collecting each message into the error body
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|e| {
        let mut errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        errors.sort();
        AppError::Validation(errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::CreateBook;

    #[test]
    fn collects_every_field_message() {
        let request = CreateBook {
            title: String::new(),
            author: String::new(),
            isbn: "123".to_string(),
        };

        let err = validate_payload(&request).unwrap_err();
        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages.contains(&"title is required".to_string()));
                assert!(messages.contains(&"author is required".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
