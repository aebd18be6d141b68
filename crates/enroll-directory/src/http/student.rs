//! HTTP client for the student service.

use async_trait::async_trait;
use reqwest::Client;

use enroll_core::result::AppResult;
use enroll_core::traits::directory::StudentDirectory;
use enroll_core::types::directory::StudentSnapshot;
use enroll_core::types::id::StudentId;

use super::envelope::StudentPayload;
use super::{endpoint, get_data};

/// Student directory backed by the student service REST API.
#[derive(Debug, Clone)]
pub struct HttpStudentDirectory {
    client: Client,
    base_url: String,
}

impl HttpStudentDirectory {
    /// Create a client for the service at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StudentDirectory for HttpStudentDirectory {
    async fn get(&self, student_id: &StudentId) -> AppResult<Option<StudentSnapshot>> {
        let url = endpoint(&self.base_url, &format!("student/{student_id}"))?;
        let payload: Option<StudentPayload> = get_data(&self.client, url).await?;
        Ok(payload.map(StudentSnapshot::from))
    }
}
