#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::DialogueReply;
use crate::domain::models::DialogueRequest;
use crate::domain::models::DialogueService;
use crate::domain::models::IntakeError;

fn convert_err(err: reqwest::Error) -> IntakeError {
    return IntakeError::NetworkFailure(err.to_string());
}

/// Talks to the dialogue engine over its JSON `POST /chat` endpoint.
pub struct HttpDialogue {
    url: String,
    health_check_timeout: Option<u64>,
    request_timeout: Option<u64>,
}

impl Default for HttpDialogue {
    fn default() -> HttpDialogue {
        return HttpDialogue {
            url: Config::get(ConfigKey::DialogueURL),
            health_check_timeout: Config::get_millis(ConfigKey::HealthCheckTimeout),
            request_timeout: Config::get_millis(ConfigKey::RequestTimeout),
        };
    }
}

impl HttpDialogue {
    fn endpoint(&self, path: &str) -> String {
        return format!("{url}/{path}", url = self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl DialogueService for HttpDialogue {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<(), IntakeError> {
        if self.url.is_empty() {
            return Err(IntakeError::NetworkFailure(
                "Dialogue URL is not defined".to_string(),
            ));
        }

        let mut req = reqwest::Client::new().get(self.endpoint("openapi.json"));
        if let Some(millis) = self.health_check_timeout {
            req = req.timeout(Duration::from_millis(millis));
        }

        let res = req.send().await.map_err(|err| {
            tracing::error!(error = ?err, "Dialogue engine is not reachable");
            return convert_err(err);
        })?;

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Dialogue engine health check failed");
            return Err(IntakeError::NetworkFailure(format!(
                "health check returned status {status}"
            )));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send(&self, request: DialogueRequest) -> Result<DialogueReply, IntakeError> {
        let mut req = reqwest::Client::new()
            .post(self.endpoint("chat"))
            .json(&request);
        if let Some(millis) = self.request_timeout {
            req = req.timeout(Duration::from_millis(millis));
        }

        let res = req.send().await.map_err(convert_err)?;
        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to send message to the dialogue engine"
            );
            return Err(IntakeError::NetworkFailure(format!(
                "dialogue engine returned status {}",
                res.status().as_u16()
            )));
        }

        let body = res.text().await.map_err(convert_err)?;
        let reply = serde_json::from_str::<DialogueReply>(&body).map_err(|err| {
            tracing::error!(error = ?err, "Failed to parse dialogue engine reply");
            return IntakeError::MalformedResponse(err.to_string());
        })?;

        return Ok(reply);
    }
}
