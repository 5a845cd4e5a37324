pub mod books;
pub mod catalog;
pub mod health;
