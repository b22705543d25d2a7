//! Data models for books and loans

pub mod book;
pub mod loan;
pub mod page;
