//! Loan management service

use chrono::{Duration, NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::loan::{CreateLoan, Loan, LoanDetails, LoanQuery},
    repository::Repository,
};

/// Date before which an active loan counts as overdue
pub fn overdue_cutoff(today: NaiveDate, after_days: i64) -> NaiveDate {
    today - Duration::days(after_days)
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new loan for the book with the given ISBN. The book must
    /// exist and must not be out on an active loan.
    pub async fn create_loan(&self, loan: CreateLoan) -> AppResult<Loan> {
        let book = self
            .repository
            .books
            .find_by_isbn(&loan.isbn)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Book not found for informed ISBN.".to_string())
            })?;

        if self.repository.loans.exists_active_by_book(book.id).await? {
            return Err(AppError::BusinessRule("Book already loaned.".to_string()));
        }

        let today = Utc::now().date_naive();
        self.repository
            .loans
            .create(book.id, &loan.customer, &loan.customer_email, today)
            .await
    }

    /// Set the returned flag on a loan
    pub async fn return_loan(&self, loan_id: i32, returned: bool) -> AppResult<LoanDetails> {
        // 404 before touching the row
        self.repository.loans.get_by_id(loan_id).await?;
        self.repository.loans.set_returned(loan_id, returned).await
    }

    /// Find loans by book ISBN or customer, paginated
    pub async fn find_loans(&self, query: &LoanQuery) -> AppResult<(Vec<LoanDetails>, i64)> {
        self.repository.loans.find(query).await
    }

    /// Get loans for a book, paginated
    pub async fn loans_by_book(
        &self,
        book_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<LoanDetails>, i64)> {
        // Verify book exists
        self.repository.books.get_by_id(book_id).await?;
        self.repository.loans.find_by_book(book_id, page, per_page).await
    }

    /// All loans overdue as of today
    pub async fn overdue_loans(&self, after_days: i64) -> AppResult<Vec<Loan>> {
        let cutoff = overdue_cutoff(Utc::now().date_naive(), after_days);
        self.repository.loans.find_overdue(cutoff).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_n_days_back() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            overdue_cutoff(today, 4),
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
    }

    #[test]
    fn cutoff_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(
            overdue_cutoff(today, 4),
            NaiveDate::from_ymd_opt(2024, 2, 27).unwrap()
        );
    }
}
