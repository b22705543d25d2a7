//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::book::Book;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub customer: String,
    pub customer_email: String,
    pub loan_date: NaiveDate,
    pub returned: bool,
}

/// Loan with its book embedded, as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub customer: String,
    pub customer_email: String,
    pub loan_date: NaiveDate,
    pub returned: bool,
    pub book: Book,
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    #[validate(length(min = 1, message = "isbn is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "customer is required"))]
    pub customer: String,
    #[validate(email(message = "customer_email must be a valid email address"))]
    pub customer_email: String,
}

/// Mark-returned request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnLoan {
    pub returned: bool,
}

/// Loan search parameters. A loan matches when its book's ISBN equals `isbn`
/// or its customer equals `customer`; absent filters are ignored.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    pub isbn: Option<String>,
    pub customer: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_loan_rejects_bad_email() {
        let request = CreateLoan {
            isbn: "123".to_string(),
            customer: "Ann".to_string(),
            customer_email: "not-an-email".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_loan_accepts_complete_request() {
        let request = CreateLoan {
            isbn: "123".to_string(),
            customer: "Ann".to_string(),
            customer_email: "ann@example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
