pub mod classify;
pub mod error;
pub mod record;
pub mod session;
pub mod topo;
pub mod view;

pub use error::Error;

#[cfg(test)]
mod test;
