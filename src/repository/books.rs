//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        page::page_bounds,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, isbn FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book by ISBN
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book =
            sqlx::query_as::<_, Book>("SELECT id, title, author, isbn FROM books WHERE isbn = $1")
                .bind(isbn)
                .fetch_optional(&self.pool)
                .await?;
        Ok(book)
    }

    /// Check whether a book with the given ISBN is already registered
    pub async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, isbn
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update title and author of an existing book
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, author = $2
            WHERE id = $3
            RETURNING id, title, author, isbn
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Search books with pagination. Each provided field is matched as a
    /// case-insensitive substring; absent fields are ignored.
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let (_page, per_page, offset) = page_bounds(query.page, query.per_page);

        let mut conditions = vec!["1=1".to_string()];
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref title) = query.title {
            binds.push(format!("%{}%", title.to_lowercase()));
            conditions.push(format!("LOWER(title) LIKE ${}", binds.len()));
        }

        if let Some(ref author) = query.author {
            binds.push(format!("%{}%", author.to_lowercase()));
            conditions.push(format!("LOWER(author) LIKE ${}", binds.len()));
        }

        if let Some(ref isbn) = query.isbn {
            binds.push(format!("%{}%", isbn.to_lowercase()));
            conditions.push(format!("LOWER(isbn) LIKE ${}", binds.len()));
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM books WHERE {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for bind in &binds {
            count = count.bind(bind);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT id, title, author, isbn FROM books WHERE {} ORDER BY title LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut select = sqlx::query_as::<_, Book>(&select_query);
        for bind in &binds {
            select = select.bind(bind);
        }
        let books = select.fetch_all(&self.pool).await?;

        Ok((books, total))
    }
}
