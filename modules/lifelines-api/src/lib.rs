pub mod rest;
pub mod routes;

pub use routes::{build_router, AppState};
