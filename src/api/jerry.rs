//! Jerry Status Endpoints

use super::{ApiClient, ApiError, Transport};
use crate::models::{JerryStatus, Roadmap};

impl<T: Transport> ApiClient<T> {
    pub async fn jerry_status(&self) -> Result<JerryStatus, ApiError> {
        self.get_json("/api/jerry").await
    }

    pub async fn jerry_roadmap(&self) -> Result<Roadmap, ApiError> {
        self.get_json("/api/jerry/roadmap").await
    }
}
