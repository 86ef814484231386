pub mod health;
pub mod helpers;
pub mod links;
pub mod redirect;
pub mod routes;
pub mod stats;
pub mod types;

pub use routes::register;
