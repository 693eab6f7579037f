use reqwest::Method;
use tracing::{info, instrument};
use tutorlink_models::{AvailabilitySlot, AvailabilitySlotUpdate, NewAvailabilitySlot};
use validator::Validate;

use crate::api::ApiClient;
use crate::api::error::{ApiError, check_status, read_json};

/// Weekly availability slots of the signed-in user.
pub struct AvailabilityService;

impl AvailabilityService {
    #[instrument(skip(client))]
    pub async fn list(client: &ApiClient) -> Result<Vec<AvailabilitySlot>, ApiError> {
        let response = client
            .dispatch(client.request(Method::GET, "/availability/me"))
            .await?;

        let mut slots: Vec<AvailabilitySlot> = read_json(check_status(response).await?).await?;
        slots.sort_by_key(|s| (s.day_of_week, s.start_time));
        Ok(slots)
    }

    #[instrument(skip(client))]
    pub async fn create(
        client: &ApiClient,
        slot: &NewAvailabilitySlot,
    ) -> Result<AvailabilitySlot, ApiError> {
        slot.validate()?;

        let response = client
            .dispatch(client.request(Method::POST, "/availability").json(slot))
            .await?;

        let created: AvailabilitySlot = read_json(check_status(response).await?).await?;
        info!(slot.id = %created.id, "Availability slot created");
        Ok(created)
    }

    #[instrument(skip(client))]
    pub async fn update(
        client: &ApiClient,
        id: &str,
        update: &AvailabilitySlotUpdate,
    ) -> Result<AvailabilitySlot, ApiError> {
        update.validate()?;

        let response = client
            .dispatch(
                client
                    .request(Method::PUT, &format!("/availability/{id}"))
                    .json(update),
            )
            .await?;

        let updated: AvailabilitySlot = read_json(check_status(response).await?).await?;
        info!(slot.id = %updated.id, "Availability slot updated");
        Ok(updated)
    }

    #[instrument(skip(client))]
    pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
        let response = client
            .dispatch(client.request(Method::DELETE, &format!("/availability/{id}")))
            .await?;

        check_status(response).await?;
        info!(slot.id = %id, "Availability slot deleted");
        Ok(())
    }
}
