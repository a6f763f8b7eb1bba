//! Sample Project Endpoints

use super::{ApiClient, ApiError, Transport};
use crate::models::{ProjectStats, SampleProject, SampleProjectList};

impl<T: Transport> ApiClient<T> {
    /// Every project, in id order. The page filters by delivery method itself.
    pub async fn list_sample_projects(&self) -> Result<Vec<SampleProject>, ApiError> {
        let list: SampleProjectList = self.get_json("/api/sample-projects").await?;
        Ok(list.projects)
    }

    pub async fn sample_project_stats(&self) -> Result<ProjectStats, ApiError> {
        self.get_json("/api/sample-projects/stats").await
    }
}
