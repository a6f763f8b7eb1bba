//! Meeting Endpoints

use super::{ApiClient, ApiError, Transport};
use crate::models::{Meeting, MeetingList};

impl<T: Transport> ApiClient<T> {
    pub async fn list_meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        let list: MeetingList = self.get_json("/api/meetings").await?;
        Ok(list.meetings)
    }
}
