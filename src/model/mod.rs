pub mod cache;
pub mod error;
pub mod merger;
pub mod tree;
