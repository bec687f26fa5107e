#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod client;

pub use client::{OpenweatherApi, Settings, DEFAULT_API_URL};
