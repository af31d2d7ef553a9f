pub mod capture;
pub mod error;
pub mod net;
pub mod sim;
pub mod timeline;
pub mod trace;
pub mod viz;

pub use error::{Result, TraceError};

#[cfg(test)]
mod test;
