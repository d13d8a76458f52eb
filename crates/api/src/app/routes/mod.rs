use axum::Router;

pub mod sales;
pub mod system;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new().nest("/sales", sales::router())
}
