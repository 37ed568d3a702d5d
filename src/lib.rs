// Library exports for testing
pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod service;
pub mod validation;
pub mod visual;

pub use config::*;
pub use error::*;
pub use handlers::*;
pub use ledger::*;
pub use models::*;
pub use service::*;
pub use validation::*;
pub use visual::*;
