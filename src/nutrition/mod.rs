pub mod client;
pub mod dedup;
pub mod handlers;
pub mod summary;
pub mod tracker;
pub mod week;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
