pub mod routes;
pub mod startup;
pub mod state;
pub mod prices;
pub mod errors;
pub mod openapi;

pub use startup::run;
