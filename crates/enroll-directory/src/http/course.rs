//! HTTP client for the course service.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use enroll_core::result::AppResult;
use enroll_core::traits::directory::{CourseDirectory, SeatUpdate};
use enroll_core::types::directory::{CourseQuery, CourseSnapshot};
use enroll_core::types::id::CourseId;

use super::envelope::{ApiEnvelope, CoursePayload, PagePayload};
use super::{endpoint, get_data, request_error};

/// Status filter value of open courses.
const OPEN_STATUS: &str = "1";

/// Course directory backed by the course service REST API.
#[derive(Debug, Clone)]
pub struct HttpCourseDirectory {
    client: Client,
    base_url: String,
}

impl HttpCourseDirectory {
    /// Create a client for the service at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn put_seat(&self, course_id: &CourseId, action: &str) -> AppResult<SeatUpdate> {
        let url = endpoint(&self.base_url, &format!("course/{course_id}/{action}"))?;
        let resp = self.client.put(url).send().await.map_err(request_error)?;
        let envelope: ApiEnvelope<serde_json::Value> =
            resp.json().await.map_err(request_error)?;
        let update = envelope.seat_update();
        debug!(course_id = %course_id, action, code = envelope.code, ?update, "Seat counter update");
        Ok(update)
    }
}

#[async_trait]
impl CourseDirectory for HttpCourseDirectory {
    async fn get(&self, course_id: &CourseId) -> AppResult<Option<CourseSnapshot>> {
        let url = endpoint(&self.base_url, &format!("course/{course_id}"))?;
        let payload: Option<CoursePayload> = get_data(&self.client, url).await?;
        Ok(payload.map(CourseSnapshot::from))
    }

    async fn increment_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate> {
        self.put_seat(course_id, "increment-selected").await
    }

    async fn decrement_seat(&self, course_id: &CourseId) -> AppResult<SeatUpdate> {
        self.put_seat(course_id, "decrement-selected").await
    }

    async fn list_open(&self, query: &CourseQuery) -> AppResult<Vec<CourseSnapshot>> {
        let mut url = endpoint(&self.base_url, "course/page")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("current", &query.page.to_string())
                .append_pair("size", &query.page_size.to_string())
                .append_pair("status", OPEN_STATUS);
            if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
                pairs.append_pair("keyword", keyword);
            }
        }
        let page: Option<PagePayload<CoursePayload>> = get_data(&self.client, url).await?;
        Ok(page
            .map(|p| p.records.into_iter().map(CourseSnapshot::from).collect())
            .unwrap_or_default())
    }
}
