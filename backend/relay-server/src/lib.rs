pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    snapshot::{IngestResponse, ingest_snapshot},
    status::{StatusResponse, relay_status},
};

pub use crate::routes::build_router;
