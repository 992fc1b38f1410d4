pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, RECOMMENDATIONS_PATH};
pub use state::AppState;
