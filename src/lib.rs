#![deny(dead_code)]

pub mod dispatcher;
pub mod document;
pub mod error;
pub mod host;
pub mod session;
pub mod snippets;
pub mod state;
pub mod tools;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;
