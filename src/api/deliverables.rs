//! Deliverable Endpoints

use super::{ApiClient, ApiError, Method, Transport};
use crate::models::{Deliverable, DeliverableProgress, PhaseDeliverables};

impl<T: Transport> ApiClient<T> {
    pub async fn deliverables_for_phase(&self, phase: u8) -> Result<Vec<Deliverable>, ApiError> {
        let page: PhaseDeliverables = self.get_json(&format!("/api/deliverables/month/{}", phase)).await?;
        Ok(page.deliverables)
    }

    pub async fn get_deliverable(&self, id: u32) -> Result<Deliverable, ApiError> {
        self.get_json(&format!("/api/deliverables/{}", id)).await
    }

    pub async fn update_deliverable(&self, id: u32, progress: &DeliverableProgress) -> Result<(), ApiError> {
        let _: serde_json::Value = self.send_json(Method::Put, &format!("/api/deliverables/{}", id), progress).await?;
        Ok(())
    }
}
