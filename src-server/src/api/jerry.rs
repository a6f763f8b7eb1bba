//! Jerry status endpoints (public)

use axum::response::Json;

use crate::domain::{JerryStatus, Roadmap};

pub async fn status() -> Json<JerryStatus> {
    Json(JerryStatus::current())
}

pub async fn roadmap() -> Json<Roadmap> {
    Json(Roadmap::current())
}
