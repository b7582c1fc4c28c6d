pub mod errors;
pub mod extract;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod trace;
pub mod wire;

pub use routes::AppState;
pub use startup::run;
