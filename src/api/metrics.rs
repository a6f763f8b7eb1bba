//! Metric Endpoints

use std::collections::BTreeMap;

use super::{ApiClient, ApiError, Method, Transport};
use crate::models::{Metric, MetricRecord};

impl<T: Transport> ApiClient<T> {
    /// Metrics in id order.
    pub async fn list_metrics(&self) -> Result<Vec<Metric>, ApiError> {
        let keyed: BTreeMap<String, Metric> = self.get_json("/api/metrics/").await?;
        let mut metrics: Vec<Metric> = keyed.into_values().collect();
        metrics.sort_by_key(|m| m.id);
        Ok(metrics)
    }

    pub async fn record_metric(&self, record: &MetricRecord) -> Result<(), ApiError> {
        let _: serde_json::Value =
            self.send_json(Method::Post, &format!("/api/metrics/{}", record.metric_id), record).await?;
        Ok(())
    }
}
