use reqwest::{Method, StatusCode};
use tracing::{debug, info, instrument};
use tutorlink_models::students::StudentProfileEnvelope;
use tutorlink_models::{StudentProfile, StudentProfilePayload};
use validator::Validate;

use crate::api::ApiClient;
use crate::api::error::{ApiError, check_status, read_json};

pub struct StudentService;

impl StudentService {
    /// Fetch the signed-in student's profile. `None` until one is created.
    #[instrument(skip(client))]
    pub async fn get_profile(client: &ApiClient) -> Result<Option<StudentProfile>, ApiError> {
        let response = client
            .dispatch(client.request(Method::GET, "/students/me"))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("No student profile yet");
            return Ok(None);
        }

        let envelope: StudentProfileEnvelope = read_json(check_status(response).await?).await?;
        Ok(Some(envelope.profile))
    }

    /// Create or update the signed-in student's profile.
    #[instrument(skip(client, payload))]
    pub async fn upsert_profile(
        client: &ApiClient,
        payload: &StudentProfilePayload,
    ) -> Result<StudentProfile, ApiError> {
        payload.validate()?;

        let response = client
            .dispatch(client.request(Method::POST, "/students/me").json(payload))
            .await?;

        let envelope: StudentProfileEnvelope = read_json(check_status(response).await?).await?;
        info!(profile.id = %envelope.profile.id, "Student profile saved");
        Ok(envelope.profile)
    }
}
