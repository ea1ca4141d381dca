//! REST backend for the caterfind server.
//!
//! Endpoints:
//! - `GET  api/availability?userId&startDate&endDate`
//! - `POST api/availability?userId` with `{date, status}`
//! - `GET  api/calendar/events?userId[&date|&startDate&endDate]`
//! - `POST api/calendar/events?userId` with the new event
//! - `DELETE api/calendar/events/{id}`

use caterfind_core::{
    AvailabilityEntry, AvailabilityStatus, CalendarEvent, DateKey, EventId, NewEvent,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::backend::{BoxFuture, CatererBackend, EventQuery, OwnerId};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

const AVAILABILITY_PATH: &str = "api/availability";
const EVENTS_PATH: &str = "api/calendar/events";

/// Availability record as the server returns it. The server also sends
/// `id` and `userId`, which are ignored.
#[derive(Debug, Deserialize)]
struct WireAvailability {
    date: String,
    #[serde(default)]
    status: Option<String>,
}

impl WireAvailability {
    fn into_entry(self) -> Option<AvailabilityEntry> {
        let date: DateKey = match self.date.parse() {
            Ok(date) => date,
            Err(e) => {
                debug!(error = %e, "Skipping availability entry with bad date");
                return None;
            }
        };
        let status: AvailabilityStatus = match self.status.as_deref().unwrap_or("").parse() {
            Ok(status) => status,
            Err(e) => {
                debug!(date = %date, error = %e, "Skipping availability entry with bad status");
                return None;
            }
        };
        Some(AvailabilityEntry::new(date, status))
    }
}

/// `{"error": "..."}`, or `{"message": "..."}` from some endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// [`CatererBackend`] over HTTP.
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    /// Creates a backend with the given configuration.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ApiError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.config
            .endpoint(path)
            .map_err(|e| ApiError::configuration(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Sends a request and maps non-success statuses to errors.
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            let message = format!("Request failed: {}", e);
            ApiError::network(message).with_source(e)
        })?;

        let status = response.status();
        trace!(status = %status, url = %response.url(), "Received response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let message = parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| body.trim().to_string());

        let error = match status {
            StatusCode::BAD_REQUEST => ApiError::bad_request(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::access_denied(message),
            StatusCode::NOT_FOUND => ApiError::not_found(message),
            s if s.is_server_error() => ApiError::server(message),
            s => {
                warn!(status = %s, body = %body, "Unexpected response status");
                ApiError::invalid_response(format!("Unexpected status {}: {}", s, message))
            }
        };
        error.with_status(status.as_u16())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::invalid_response(format!("Failed to parse response: {}", e)).with_source(e)
        })
    }

    async fn fetch_availability(
        &self,
        owner: OwnerId,
        start: DateKey,
        end: DateKey,
    ) -> ApiResult<Vec<AvailabilityEntry>> {
        let url = self.endpoint(AVAILABILITY_PATH)?;
        trace!(url = %url, owner = %owner, start = %start, end = %end, "GET availability");

        let request = self.client.get(url).query(&[
            ("userId", owner.to_string()),
            ("startDate", start.to_string()),
            ("endDate", end.to_string()),
        ]);
        let records: Vec<WireAvailability> = Self::read_json(self.send(request).await?).await?;

        Ok(records
            .into_iter()
            .filter_map(WireAvailability::into_entry)
            .collect())
    }

    async fn post_availability(&self, owner: OwnerId, entry: AvailabilityEntry) -> ApiResult<()> {
        let url = self.endpoint(AVAILABILITY_PATH)?;
        trace!(url = %url, owner = %owner, date = %entry.date, status = %entry.status, "POST availability");

        let request = self
            .client
            .post(url)
            .query(&[("userId", owner.to_string())])
            .json(&entry);
        // 201 with the stored entry, or 204 when the day was cleared.
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_events(&self, owner: OwnerId, query: EventQuery) -> ApiResult<Vec<CalendarEvent>> {
        let url = self.endpoint(EVENTS_PATH)?;
        let mut params = vec![("userId", owner.to_string())];
        match query {
            EventQuery::All => {}
            EventQuery::OnDate(date) => params.push(("date", date.to_string())),
            EventQuery::Range { start, end } => {
                params.push(("startDate", start.to_string()));
                params.push(("endDate", end.to_string()));
            }
        }
        trace!(url = %url, owner = %owner, ?query, "GET events");

        let request = self.client.get(url).query(&params);
        Self::read_json(self.send(request).await?).await
    }

    async fn post_event(&self, owner: OwnerId, event: NewEvent) -> ApiResult<CalendarEvent> {
        let url = self.endpoint(EVENTS_PATH)?;
        trace!(url = %url, owner = %owner, date = %event.event_date, "POST event");

        let request = self
            .client
            .post(url)
            .query(&[("userId", owner.to_string())])
            .json(&event);
        Self::read_json(self.send(request).await?).await
    }

    async fn remove_event(&self, id: EventId) -> ApiResult<()> {
        let url = self.endpoint(&format!("{}/{}", EVENTS_PATH, id))?;
        trace!(url = %url, "DELETE event");

        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

impl CatererBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn list_availability(
        &self,
        owner: OwnerId,
        start: DateKey,
        end: DateKey,
    ) -> BoxFuture<'_, ApiResult<Vec<AvailabilityEntry>>> {
        Box::pin(self.fetch_availability(owner, start, end))
    }

    fn set_availability(
        &self,
        owner: OwnerId,
        entry: AvailabilityEntry,
    ) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(self.post_availability(owner, entry))
    }

    fn list_events(
        &self,
        owner: OwnerId,
        query: EventQuery,
    ) -> BoxFuture<'_, ApiResult<Vec<CalendarEvent>>> {
        Box::pin(self.fetch_events(owner, query))
    }

    fn create_event(
        &self,
        owner: OwnerId,
        event: NewEvent,
    ) -> BoxFuture<'_, ApiResult<CalendarEvent>> {
        Box::pin(self.post_event(owner, event))
    }

    fn delete_event(&self, id: EventId) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(self.remove_event(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn backend_creation() {
        let config = ApiConfig::new("http://localhost:8080")
            .unwrap()
            .with_timeout(Duration::from_secs(10));
        let backend = HttpBackend::new(config).unwrap();
        assert_eq!(backend.name(), "http");
        assert_eq!(backend.config().timeout, Duration::from_secs(10));
    }

    #[test]
    fn wire_availability_conversion() {
        let entry = WireAvailability {
            date: "2026-02-21".to_string(),
            status: Some("Busy".to_string()),
        }
        .into_entry()
        .unwrap();
        assert_eq!(entry.status, AvailabilityStatus::Busy);

        let bad_date = WireAvailability {
            date: "21/02/2026".to_string(),
            status: Some("busy".to_string()),
        };
        assert!(bad_date.into_entry().is_none());

        let bad_status = WireAvailability {
            date: "2026-02-21".to_string(),
            status: Some("tentative".to_string()),
        };
        assert!(bad_status.into_entry().is_none());
    }
}
