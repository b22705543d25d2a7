//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        loan::{CreateLoan, LoanDetails, LoanQuery, ReturnLoan},
        page::{page_bounds, Page},
    },
};

use super::validate_payload;

/// Response for a created loan
#[derive(Serialize, ToSchema)]
pub struct LoanCreatedResponse {
    /// Loan ID
    pub id: i32,
    /// Date the loan was registered
    pub loan_date: NaiveDate,
}

/// Create a new loan (lend a book to a customer)
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanCreatedResponse),
        (status = 400, description = "Unknown ISBN, invalid input, or book already loaned")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<LoanCreatedResponse>)> {
    validate_payload(&request)?;

    tracing::info!("Creating loan for ISBN {}", request.isbn);

    let loan = state.services.loans.create_loan(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanCreatedResponse {
            id: loan.id,
            loan_date: loan.loan_date,
        }),
    ))
}

/// Mark a loan as returned (or revert the flag)
#[utoipa::path(
    patch,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    request_body = ReturnLoan,
    responses(
        (status = 200, description = "Loan updated", body = LoanDetails),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
    Json(request): Json<ReturnLoan>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state
        .services
        .loans
        .return_loan(loan_id, request.returned)
        .await?;

    Ok(Json(loan))
}

/// List loans filtered by book ISBN or customer
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    params(
        ("isbn" = Option<String>, Query, description = "Book ISBN (exact match)"),
        ("customer" = Option<String>, Query, description = "Customer name (exact match)"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "Page of loans", body = Page<LoanDetails>)
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<Page<LoanDetails>>> {
    let (page, per_page, _) = page_bounds(query.page, query.per_page);
    let (items, total) = state.services.loans.find_loans(&query).await?;

    Ok(Json(Page {
        items,
        total,
        page,
        per_page,
    }))
}
