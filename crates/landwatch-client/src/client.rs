//! The API client: one typed method per backend endpoint.

use crate::endpoints::{self, Endpoint};
use crate::error::ClientError;
use crate::request::{ApiRequest, ResponseBody, check_application};
use crate::transport::{ReqwestTransport, Transport};
use landwatch_core::model::{
    AdminStats, AlertRow, AlertsEnvelope, ContactRequest, DashboardStats, DetectionResult,
    FeatureCollection, ForgotPasswordRequest, GenerateReportRequest, GenerateReportResponse,
    GrievanceRequest, GrievanceRow, Hotspot, HotspotsEnvelope, ImageItem, LanguageRequest,
    LeaderboardEnvelope, LeaderboardItem, LoginRequest, LoginResponse, ManualFetchRequest, NewUser,
    RegisterRequest, ReportFilter, ReportRow, Translations, UserRow, UserUpdate, UsersEnvelope,
};
use landwatch_core::{BackendConfig, SessionContext};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

/// Client for the backend's JSON endpoints.
///
/// Cloning is cheap; clones share the transport and the session context.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    /// Client over a reqwest transport built from configuration.
    pub fn from_config(config: &BackendConfig, session: SessionContext) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), session))
    }

    /// The session context requests are authenticated with.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Issue one request and classify the response.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        payload: Option<Value>,
    ) -> Result<ResponseBody, ClientError> {
        let request = ApiRequest::new(endpoint.method, endpoint.path)
            .with_query(query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
            .with_body(payload)
            .with_bearer(self.session.bearer_token());

        tracing::debug!(endpoint = %endpoint, "Sending request");
        let response = self.transport.send(request).await?;
        let status = response.status;
        let result = response.classify();
        if let Err(e) = &result {
            tracing::warn!(endpoint = %endpoint, status, error = %e, "Request failed");
        }
        result
    }

    /// Fetch, require JSON, reject application failures, decode into `T`.
    async fn fetch_as<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        payload: Option<Value>,
    ) -> Result<T, ClientError> {
        let value = self.fetch(endpoint, query, payload).await?.into_json()?;
        check_application(&value)?;
        serde_json::from_value(value)
            .map_err(|e| ClientError::Decode(format!("{endpoint}: {e}")))
    }

    /// Fetch and reject application failures, keeping the raw JSON.
    async fn send_json(&self, endpoint: Endpoint, payload: Value) -> Result<Value, ClientError> {
        self.fetch_as(endpoint, &[], Some(payload)).await
    }

    // =========================================================================
    // Auth and language
    // =========================================================================

    pub async fn set_language(&self, language: &str) -> Result<Value, ClientError> {
        let payload = encode(&LanguageRequest {
            language: language.to_string(),
        })?;
        self.send_json(endpoints::SET_LANGUAGE, payload).await
    }

    /// Interface texts for `language`, or for the session's language when `None`.
    pub async fn translations(&self, language: Option<&str>) -> Result<Translations, ClientError> {
        let query: Vec<(&str, String)> = language
            .map(|lang| vec![("lang", lang.to_string())])
            .unwrap_or_default();
        self.fetch_as(endpoints::TRANSLATIONS, &query, None).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        self.send_json(endpoints::REGISTER, encode(request)?).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.fetch_as(endpoints::LOGIN, &[], Some(encode(request)?)).await
    }

    /// Returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ClientError> {
        let payload = encode(&ForgotPasswordRequest {
            email: email.to_string(),
        })?;
        let value = self.send_json(endpoints::FORGOT_PASSWORD, payload).await?;
        Ok(message_of(&value).unwrap_or_default())
    }

    // =========================================================================
    // Imagery and detection
    // =========================================================================

    pub async fn images(&self) -> Result<Vec<ImageItem>, ClientError> {
        self.fetch_as(endpoints::IMAGES, &[], None).await
    }

    pub async fn manual_fetch(&self, start_date: &str, end_date: &str) -> Result<Value, ClientError> {
        let payload = encode(&ManualFetchRequest {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        })?;
        self.send_json(endpoints::MANUAL_FETCH, payload).await
    }

    pub async fn detect(&self) -> Result<DetectionResult, ClientError> {
        self.fetch_as(endpoints::DETECT, &[], None).await
    }

    pub async fn hotspots(&self) -> Result<Vec<Hotspot>, ClientError> {
        let envelope: HotspotsEnvelope = self.fetch_as(endpoints::HOTSPOTS, &[], None).await?;
        Ok(envelope.hotspots)
    }

    // =========================================================================
    // Reports and map
    // =========================================================================

    pub async fn reports(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, ClientError> {
        self.fetch_as(endpoints::REPORTS, &filter.query_pairs(), None)
            .await
    }

    pub async fn generate_report(&self, kind: &str) -> Result<GenerateReportResponse, ClientError> {
        let payload = encode(&GenerateReportRequest {
            kind: kind.to_string(),
        })?;
        self.fetch_as(endpoints::GENERATE_REPORT, &[], Some(payload))
            .await
    }

    pub async fn detections_geojson(&self) -> Result<FeatureCollection, ClientError> {
        self.fetch_as(endpoints::DETECTIONS_GEOJSON, &[], None).await
    }

    // =========================================================================
    // Admin and dashboards
    // =========================================================================

    pub async fn admin_stats(&self) -> Result<AdminStats, ClientError> {
        self.fetch_as(endpoints::ADMIN_STATS, &[], None).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.fetch_as(endpoints::DASHBOARD_STATS, &[], None).await
    }

    pub async fn alerts(&self) -> Result<Vec<AlertRow>, ClientError> {
        let envelope: AlertsEnvelope = self.fetch_as(endpoints::ALERTS, &[], None).await?;
        Ok(envelope.alerts)
    }

    pub async fn users(&self) -> Result<Vec<UserRow>, ClientError> {
        let envelope: UsersEnvelope = self.fetch_as(endpoints::USERS, &[], None).await?;
        Ok(envelope.users)
    }

    pub async fn add_user(&self, user: &NewUser) -> Result<Value, ClientError> {
        self.send_json(endpoints::ADD_USER, encode(user)?).await
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<Value, ClientError> {
        self.send_json(endpoints::UPDATE_USER, encode(update)?).await
    }

    pub async fn delete_user(&self, email: &str) -> Result<Value, ClientError> {
        self.send_json(endpoints::DELETE_USER, json!({ "email": email }))
            .await
    }

    // =========================================================================
    // Grievances, contact and health
    // =========================================================================

    /// Returns the server's confirmation message.
    pub async fn submit_grievance(&self, grievance: &GrievanceRequest) -> Result<String, ClientError> {
        let value = self.send_json(endpoints::GRIEVANCE, encode(grievance)?).await?;
        Ok(message_of(&value).unwrap_or_else(|| "Grievance submitted".to_string()))
    }

    pub async fn grievances(&self) -> Result<Vec<GrievanceRow>, ClientError> {
        self.fetch_as(endpoints::GRIEVANCES, &[], None).await
    }

    /// Returns the server's confirmation message.
    pub async fn contact(&self, request: &ContactRequest) -> Result<String, ClientError> {
        let value = self.send_json(endpoints::CONTACT, encode(request)?).await?;
        Ok(message_of(&value).unwrap_or_else(|| "Message sent".to_string()))
    }

    pub async fn grievance_leaderboard(&self) -> Result<Vec<LeaderboardItem>, ClientError> {
        let envelope: LeaderboardEnvelope = self
            .fetch_as(endpoints::GRIEVANCE_LEADERBOARD, &[], None)
            .await?;
        Ok(envelope.items)
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        self.fetch(endpoints::HEALTH, &[], None).await?.into_json()
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, ClientError> {
    serde_json::to_value(payload).map_err(|e| ClientError::Encode(e.to_string()))
}

fn message_of(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::request::{Method, RawResponse};
    use landwatch_core::{Role, SessionCredentials};
    use pretty_assertions::assert_eq;

    fn client_with(mock: &MockTransport) -> ApiClient {
        ApiClient::new(Arc::new(mock.clone()), SessionContext::new())
    }

    #[tokio::test]
    async fn test_fetch_sends_literal_payload() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Post, "/api/register", 200, json!({"success": true}));
        let client = client_with(&mock);

        let request = RegisterRequest {
            name: "Asha".to_string(),
            email: "asha@example.org".to_string(),
            password: "pw".to_string(),
            role: "officer".to_string(),
        };
        client.register(&request).await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(
            sent[0].body,
            Some(json!({"name": "Asha", "email": "asha@example.org", "password": "pw", "role": "officer"}))
        );
    }

    #[tokio::test]
    async fn test_bearer_attached_once_logged_in() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Get, "/api/users", 200, json!({"users": []}));
        let client = client_with(&mock);

        client.users().await.unwrap();
        client
            .session()
            .set(SessionCredentials::new("tok", Role::Admin));
        client.users().await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[1].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_application_failure_is_error() {
        let mock = MockTransport::new();
        mock.respond_json(
            Method::Post,
            "/api/reports/generate",
            200,
            json!({"success": false, "message": "Unsupported report type"}),
        );
        let client = client_with(&mock);

        let err = client.generate_report("docx").await.unwrap_err();
        assert!(matches!(err, ClientError::Application { .. }));
        assert_eq!(err.user_message(), "Unsupported report type");
    }

    #[tokio::test]
    async fn test_reports_query_params() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Get, "/api/reports", 200, json!([]));
        let client = client_with(&mock);

        client
            .reports(&ReportFilter::from_fields(Some("12"), Some("2025-01-01")))
            .await
            .unwrap();
        client.reports(&ReportFilter::default()).await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent[0].path_and_query(), "/api/reports?ward=12&date=2025-01-01");
        assert_eq!(sent[1].path_and_query(), "/api/reports");
    }

    #[tokio::test]
    async fn test_text_body_where_json_expected_is_decode_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/alerts", RawResponse::text(200, "<html></html>"));
        let client = client_with(&mock);

        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_translations_language_query() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Get, "/api/translations", 200, json!({"alerts": "Alerts"}));
        let client = client_with(&mock);

        let translations = client.translations(Some("hi")).await.unwrap();
        client.translations(None).await.unwrap();

        assert_eq!(translations.text("alerts"), Some("Alerts"));
        let sent = mock.requests();
        assert_eq!(sent[0].path_and_query(), "/api/translations?lang=hi");
        assert_eq!(sent[1].path_and_query(), "/api/translations");
    }

    #[tokio::test]
    async fn test_delete_user_body() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Delete, "/api/users", 200, json!({"success": true}));
        let client = client_with(&mock);

        client.delete_user("x@y.com").await.unwrap();
        assert_eq!(mock.requests()[0].body, Some(json!({"email": "x@y.com"})));
    }
}
