pub mod endpoints;
pub mod error;
pub mod hero;
pub mod hero_power;
pub mod payload;
pub mod power;
pub mod validation;

pub use endpoints::configure;
pub use error::Error;
