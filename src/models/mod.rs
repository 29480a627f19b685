//! Core value objects shared by every source.

mod article;
mod author;

pub use article::Article;
pub use author::Author;
