//! HTTP client for the identity provider.
//!
//! Implements [`SessionProvider`] against a small REST surface rooted at the
//! configured base URL: `POST signup`, `POST token`, `POST logout`, with the
//! session held in memory for the lifetime of the process. Provider error
//! bodies are surfaced verbatim so the auth screens show the same copy the
//! backend wrote.

use recast_core::AuthError;
use recast_core::Session;
use recast_core::SessionProvider;
use recast_core::SignInRequest;
use recast_core::SignUpRequest;
use recast_core::User;
use serde::Serialize;
use tokio::sync::Mutex;
use url::Url;

pub struct HttpSessionProvider {
    base_url: Url,
    client: reqwest::Client,
    session: Mutex<Option<Session>>,
}

impl HttpSessionProvider {
    pub fn new(mut base_url: Url) -> Self {
        // Relative joins drop the last path segment unless the base ends
        // with a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
            session: Mutex::new(None),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|err| AuthError::Transport(err.to_string()))
    }

    async fn authenticate<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Session, AuthError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(provider_message(status.as_u16(), &body)));
        }

        let session = response.json::<Session>().await.map_err(transport)?;
        *self.session.lock().await = Some(session.clone());
        Ok(session)
    }
}

impl SessionProvider for HttpSessionProvider {
    async fn sign_up(&self, request: SignUpRequest) -> Result<Session, AuthError> {
        self.authenticate("signup", &request).await
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<Session, AuthError> {
        self.authenticate("token", &request).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self
            .session
            .lock()
            .await
            .as_ref()
            .map(|s| s.access_token.clone());
        let Some(token) = token else {
            return Ok(());
        };

        let url = self.endpoint("logout")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(provider_message(status.as_u16(), &body)));
        }

        *self.session.lock().await = None;
        Ok(())
    }

    async fn get_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.session.lock().await.as_ref().map(|s| s.user.clone()))
    }

    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.lock().await.clone())
    }
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Transport(err.to_string())
}

/// Extract a human-readable message from an error response. Tries the common
/// JSON message keys first, then falls back to the raw body or the status.
fn provider_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "message", "msg", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("identity provider returned status {status}")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn provider_message_prefers_json_keys() {
        assert_eq!(
            provider_message(400, r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            provider_message(422, r#"{"message":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(provider_message(500, "service unavailable"), "service unavailable");
        assert_eq!(
            provider_message(502, ""),
            "identity provider returned status 502"
        );
    }

    #[test]
    fn endpoints_join_under_the_base_path() {
        let provider =
            HttpSessionProvider::new("https://auth.example.com/v1".parse().expect("url"));
        let token = provider.endpoint("token").expect("join");
        assert_eq!(token.as_str(), "https://auth.example.com/v1/token");

        let provider =
            HttpSessionProvider::new("https://auth.example.com/v1/".parse().expect("url"));
        let signup = provider.endpoint("signup").expect("join");
        assert_eq!(signup.as_str(), "https://auth.example.com/v1/signup");
    }

    #[tokio::test]
    async fn session_starts_empty() {
        let provider = HttpSessionProvider::new("https://auth.example.com/".parse().expect("url"));
        assert_eq!(provider.get_session().await, Ok(None));
        assert_eq!(provider.get_user().await, Ok(None));
        // Signing out without a session is a no-op.
        assert_eq!(provider.sign_out().await, Ok(()));
    }
}
