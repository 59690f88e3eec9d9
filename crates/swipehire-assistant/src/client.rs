//! HTTP client for the assistant gateway

use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::{
    conversation::ChatMessage,
    error::{Error, Result},
    stream::{TurnEventStream, interpret},
};

/// Company context sent with every question so the assistant can ground its
/// gap analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    pub industry: String,
    pub size: String,
    pub current_team: Vec<String>,
}

impl Default for CompanyData {
    fn default() -> Self {
        Self {
            industry: "Technology".to_string(),
            size: "Startup".to_string(),
            current_team: vec![
                "Frontend".to_string(),
                "Backend".to_string(),
                "Design".to_string(),
            ],
        }
    }
}

#[derive(Debug, Serialize)]
struct AssistantRequest<'a> {
    messages: &'a [ChatMessage],
    #[serde(rename = "companyData")]
    company_data: &'a CompanyData,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: Option<String>,
}

/// Client for the hiring assistant gateway
pub struct AssistantClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl AssistantClient {
    /// Create a client for the given gateway URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key: None,
        }
    }

    /// Attach a bearer token sent as `Authorization` header
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Create from the `SWIPEHIRE_ASSISTANT_URL` and `SWIPEHIRE_API_KEY`
    /// environment variables
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SWIPEHIRE_ASSISTANT_URL").map_err(|_| {
            Error::InvalidConfig("SWIPEHIRE_ASSISTANT_URL is not set".to_string())
        })?;
        let mut client = Self::new(url);
        if let Ok(key) = std::env::var("SWIPEHIRE_API_KEY") {
            client = client.with_api_key(key);
        }
        Ok(client)
    }

    /// Ask the assistant a question, streaming back turn events.
    ///
    /// `messages` is the full conversation history including the new user
    /// message. A non-success status is mapped to a fatal error here and the
    /// event stream never starts; 429 and 402 get their own variants with the
    /// upstream message forwarded verbatim when present.
    pub async fn ask(
        &self,
        messages: &[ChatMessage],
        company: &CompanyData,
    ) -> Result<TurnEventStream> {
        let request = AssistantRequest {
            messages,
            company_data: company,
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<UpstreamError>().await {
                Ok(body) => body.error,
                Err(e) => {
                    tracing::debug!(error = %e, "non-JSON error body from gateway");
                    None
                }
            };
            return Err(Error::from_status(status.as_u16(), message));
        }

        tracing::debug!(url = %self.url, "assistant stream open");
        Ok(interpret(response.bytes_stream().map_err(Error::Http)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_data_serializes_camel_case() {
        let json = serde_json::to_value(CompanyData::default()).unwrap();
        assert_eq!(json["industry"], "Technology");
        assert_eq!(json["size"], "Startup");
        assert_eq!(
            json["currentTeam"],
            serde_json::json!(["Frontend", "Backend", "Design"])
        );
    }

    #[test]
    fn test_request_body_shape() {
        use crate::conversation::Role;

        let messages = vec![ChatMessage {
            role: Role::User,
            content: "Analyze gaps".to_string(),
        }];
        let company = CompanyData::default();
        let body = serde_json::to_value(AssistantRequest {
            messages: &messages,
            company_data: &company,
        })
        .unwrap();

        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Analyze gaps");
        assert!(body["companyData"]["currentTeam"].is_array());
    }

    #[test]
    fn test_from_env_requires_url() {
        // run with the variable absent; isolate from the ambient environment
        unsafe {
            std::env::remove_var("SWIPEHIRE_ASSISTANT_URL");
        }
        assert!(matches!(
            AssistantClient::from_env(),
            Err(Error::InvalidConfig(_))
        ));
    }
}
