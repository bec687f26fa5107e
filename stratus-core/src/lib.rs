#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod domain;
mod error;
mod ports;

pub use domain::*;
pub use error::*;
pub use ports::*;
