#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod adapter;
mod error;
mod models;
mod queries;

pub use adapter::{SqliteAdapter, SqliteSettings};
