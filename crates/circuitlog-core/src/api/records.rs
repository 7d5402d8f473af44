//! HTTP client for workout result records.
//!
//! Two persistence operations plus the end-of-workout flow:
//! - bulk create: `POST api/workouts/{id}/workout_results/bulk_create`
//!   (the session always sends a single-element batch),
//! - update: `PATCH api/workouts/{id}/workout_results/{record_id}`,
//! - generate: `POST api/workouts/{id}/workout_results/generate`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;
use crate::workout::WeightUnit;

/// Weight as the server stores it: numeric value plus unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightField {
    pub value: f64,
    pub unit: WeightUnit,
}

/// One set's record as sent to the server. `note` is omitted entirely
/// when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub set: u32,
    pub reps: u32,
    pub total_time: u64,
    pub workout_detail_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub weight: WeightField,
}

/// Server-canonical attributes of a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttributes {
    pub set: u32,
    pub reps: u32,
    pub weight: WeightField,
}

/// A stored record with its server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResource {
    pub id: String,
    pub attributes: RecordAttributes,
}

/// End-of-workout flags; used only for routing to the next screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorkoutCompletion {
    pub last_of_template: bool,
    pub last_of_plan: bool,
}

#[derive(Serialize)]
struct BulkCreateRequest<'a> {
    workout_results: &'a [RecordPayload],
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    workout_result: &'a RecordPayload,
}

#[derive(Deserialize)]
struct ListEnvelope {
    data: Vec<RecordResource>,
}

#[derive(Deserialize)]
struct ItemEnvelope {
    data: RecordResource,
}

/// Workout record API client.
#[derive(Debug, Clone)]
pub struct RecordClient {
    http: Client,
    base_url: Url,
}

impl RecordClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Create records for one or more sets. The response carries the
    /// server-assigned ids and canonical attributes.
    pub async fn bulk_create(
        &self,
        workout_id: &str,
        records: &[RecordPayload],
    ) -> Result<Vec<RecordResource>, ApiError> {
        let url = self
            .base_url
            .join(&format!("api/workouts/{workout_id}/workout_results/bulk_create"))?;
        let resp = self
            .http
            .post(url)
            .json(&BulkCreateRequest {
                workout_results: records,
            })
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let envelope: ListEnvelope = resp.json().await?;
        Ok(envelope.data)
    }

    /// Update an existing record in place.
    pub async fn update(
        &self,
        workout_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<RecordResource, ApiError> {
        let url = self
            .base_url
            .join(&format!("api/workouts/{workout_id}/workout_results/{record_id}"))?;
        let resp = self
            .http
            .patch(url)
            .json(&UpdateRequest {
                workout_result: payload,
            })
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let envelope: ItemEnvelope = resp.json().await?;
        Ok(envelope.data)
    }

    /// Run the end-of-workout flow; the returned flags gate which screen
    /// comes next.
    pub async fn generate_result(&self, workout_id: &str) -> Result<WorkoutCompletion, ApiError> {
        let url = self
            .base_url
            .join(&format!("api/workouts/{workout_id}/workout_results/generate"))?;
        let resp = self.http.post(url).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(set: u32) -> RecordPayload {
        RecordPayload {
            set,
            reps: 10,
            total_time: 0,
            workout_detail_id: "41".to_string(),
            note: None,
            weight: WeightField {
                value: 22.5,
                unit: WeightUnit::Kg,
            },
        }
    }

    #[test]
    fn payload_omits_empty_note() {
        let json = serde_json::to_value(payload(1)).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["weight"]["value"], 22.5);
        assert_eq!(json["weight"]["unit"], "kg");
    }

    #[test]
    fn payload_keeps_present_note() {
        let mut p = payload(1);
        p.note = Some("Set skipped".to_string());
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["note"], "Set skipped");
    }

    #[tokio::test]
    async fn bulk_create_posts_single_element_batch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/workouts/9/workout_results/bulk_create")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "workout_results": [{"set": 1, "reps": 10, "workout_detail_id": "41"}]
            })))
            .with_status(200)
            .with_body(
                r#"{"data":[{"id":"777","attributes":{"set":1,"reps":10,"weight":{"value":22.5,"unit":"kg"}}}]}"#,
            )
            .create_async()
            .await;

        let client = RecordClient::new(&server.url(), 5).unwrap();
        let created = client.bulk_create("9", &[payload(1)]).await.unwrap();
        mock.assert_async().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, "777");
        assert_eq!(created[0].attributes.reps, 10);
    }

    #[tokio::test]
    async fn update_patches_existing_record() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/workouts/9/workout_results/777")
            .with_status(200)
            .with_body(
                r#"{"data":{"id":"777","attributes":{"set":1,"reps":12,"weight":{"value":25.0,"unit":"kg"}}}}"#,
            )
            .create_async()
            .await;

        let client = RecordClient::new(&server.url(), 5).unwrap();
        let updated = client.update("9", "777", &payload(1)).await.unwrap();
        mock.assert_async().await;
        assert_eq!(updated.attributes.reps, 12);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/workouts/9/workout_results/bulk_create")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = RecordClient::new(&server.url(), 5).unwrap();
        let err = client.bulk_create("9", &[payload(1)]).await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_returns_routing_flags() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/workouts/9/workout_results/generate")
            .with_status(200)
            .with_body(r#"{"last_of_template":true,"last_of_plan":false}"#)
            .create_async()
            .await;

        let client = RecordClient::new(&server.url(), 5).unwrap();
        let completion = client.generate_result("9").await.unwrap();
        assert!(completion.last_of_template);
        assert!(!completion.last_of_plan);
    }
}
