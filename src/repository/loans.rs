//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{Loan, LoanDetails, LoanQuery},
        page::page_bounds,
    },
};

const LOAN_DETAILS_SELECT: &str = r#"
    SELECT l.id, l.customer, l.customer_email, l.loan_date, l.returned,
           b.id as book_id, b.title, b.author, b.isbn
    FROM loans l
    JOIN books b ON l.book_id = b.id
"#;

fn loan_details_from_row(row: &PgRow) -> LoanDetails {
    LoanDetails {
        id: row.get("id"),
        customer: row.get("customer"),
        customer_email: row.get("customer_email"),
        loan_date: row.get("loan_date"),
        returned: row.get("returned"),
        book: Book {
            id: row.get("book_id"),
            title: row.get("title"),
            author: row.get("author"),
            isbn: row.get("isbn"),
        },
    }
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, customer, customer_email, loan_date, returned FROM loans WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Get loan with its book embedded
    pub async fn get_details_by_id(&self, id: i32) -> AppResult<LoanDetails> {
        let query = format!("{} WHERE l.id = $1", LOAN_DETAILS_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))?;

        Ok(loan_details_from_row(&row))
    }

    /// Check whether the book has an active (not returned) loan
    pub async fn exists_active_by_book(&self, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1 AND returned = FALSE)",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new loan
    pub async fn create(
        &self,
        book_id: i32,
        customer: &str,
        customer_email: &str,
        loan_date: NaiveDate,
    ) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, customer, customer_email, loan_date, returned)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, book_id, customer, customer_email, loan_date, returned
            "#,
        )
        .bind(book_id)
        .bind(customer)
        .bind(customer_email)
        .bind(loan_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    /// Set the returned flag on a loan
    pub async fn set_returned(&self, id: i32, returned: bool) -> AppResult<LoanDetails> {
        let result = sqlx::query("UPDATE loans SET returned = $1 WHERE id = $2")
            .bind(returned)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Loan with id {} not found", id)));
        }

        self.get_details_by_id(id).await
    }

    /// Find loans matching the book's ISBN or the customer name, paginated.
    /// With no filters, lists all loans.
    pub async fn find(&self, query: &LoanQuery) -> AppResult<(Vec<LoanDetails>, i64)> {
        let (_page, per_page, offset) = page_bounds(query.page, query.per_page);

        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref isbn) = query.isbn {
            binds.push(isbn.clone());
            conditions.push(format!("b.isbn = ${}", binds.len()));
        }

        if let Some(ref customer) = query.customer {
            binds.push(customer.clone());
            conditions.push(format!("l.customer = ${}", binds.len()));
        }

        let where_clause = if conditions.is_empty() {
            "1=1".to_string()
        } else {
            conditions.join(" OR ")
        };

        let count_query = format!(
            "SELECT COUNT(*) FROM loans l JOIN books b ON l.book_id = b.id WHERE {}",
            where_clause
        );
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for bind in &binds {
            count = count.bind(bind);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} WHERE {} ORDER BY l.loan_date, l.id LIMIT {} OFFSET {}",
            LOAN_DETAILS_SELECT, where_clause, per_page, offset
        );
        let mut select = sqlx::query(&select_query);
        for bind in &binds {
            select = select.bind(bind);
        }
        let rows = select.fetch_all(&self.pool).await?;

        Ok((rows.iter().map(loan_details_from_row).collect(), total))
    }

    /// Find loans for a book, paginated
    pub async fn find_by_book(
        &self,
        book_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<LoanDetails>, i64)> {
        let (_page, per_page, offset) = page_bounds(page, per_page);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} WHERE l.book_id = $1 ORDER BY l.loan_date, l.id LIMIT {} OFFSET {}",
            LOAN_DETAILS_SELECT, per_page, offset
        );
        let rows = sqlx::query(&select_query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.iter().map(loan_details_from_row).collect(), total))
    }

    /// Find loans started before the cutoff date and not yet returned
    pub async fn find_overdue(&self, cutoff: NaiveDate) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT id, book_id, customer, customer_email, loan_date, returned
            FROM loans
            WHERE loan_date < $1 AND returned = FALSE
            ORDER BY loan_date
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
