pub mod error;
pub mod server;
pub mod types;

pub use error::*;
pub use server::*;
pub use types::*;
