pub mod config;
pub mod emit;
pub mod error;
pub mod grammar;
pub mod io;
pub mod model;
pub mod pack;
pub mod prefix;
pub mod resolve;

pub use error::{PackError, Result};
