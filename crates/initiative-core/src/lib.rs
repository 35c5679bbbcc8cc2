pub mod catalog;
pub mod config;
pub mod dice;
pub mod error;
pub mod io;
pub mod snapshot;
pub mod startup;
pub mod timeline;
pub mod token;
pub mod types;

pub use error::{InitiativeError, Result};
