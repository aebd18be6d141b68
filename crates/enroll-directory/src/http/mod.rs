//! HTTP directory clients.

pub mod course;
pub mod envelope;
pub mod student;

pub use course::HttpCourseDirectory;
pub use student::HttpStudentDirectory;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use enroll_core::error::{AppError, ErrorKind};
use enroll_core::result::AppResult;

use self::envelope::ApiEnvelope;

/// Build the shared HTTP client with the configured request timeout.
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })
}

/// Join `path` onto a service base URL.
fn endpoint(base_url: &str, path: &str) -> AppResult<Url> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid directory URL: {raw}"),
            e,
        )
    })
}

fn request_error(e: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Directory request failed: {e}"),
        e,
    )
}

/// Send a GET and unwrap the envelope. `Ok(None)` means the resource is absent.
async fn get_data<T>(client: &Client, url: Url) -> AppResult<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    let resp = client.get(url).send().await.map_err(request_error)?;
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let envelope: ApiEnvelope<T> = resp.json().await.map_err(request_error)?;
    envelope.into_data()
}
