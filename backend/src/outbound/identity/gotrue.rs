//! reqwest adapter for GoTrue-compatible identity services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AuthSession, Credentials, Identity, SessionToken};

use super::dto::{ErrorBody, PasswordGrantBody, SessionBody, SignUpBody, UserBody};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONFIRMATION_REQUIRED: &str = "Check your email to confirm your account before signing in";

/// Identity provider speaking the GoTrue REST API (`/auth/v1/*`).
#[derive(Clone)]
pub struct GoTrueIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Zeroizing<String>,
}

impl std::fmt::Debug for GoTrueIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoTrueIdentityProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

impl GoTrueIdentityProvider {
    /// Build a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint(path))
            .header("apikey", self.api_key.as_str())
    }

    async fn password_grant(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<Response, IdentityProviderError> {
        self.post(path)
            .json(&PasswordGrantBody {
                email: credentials.email().as_ref(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(transport_error)
    }
}

fn transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::unavailable(error.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, IdentityProviderError> {
    response
        .json::<T>()
        .await
        .map_err(|err| IdentityProviderError::protocol(format!("malformed response: {err}")))
}

/// Message from a failed response, falling back to the status line.
async fn failure_message(response: Response) -> String {
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap_or_default();
    body.into_message()
        .unwrap_or_else(|| format!("identity service answered {status}"))
}

/// Rate limiting and server errors are transient; other client errors are
/// refusals; anything else breaks the protocol.
async fn unexpected(response: Response) -> IdentityProviderError {
    let status = response.status();
    let message = failure_message(response).await;
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        IdentityProviderError::unavailable(message)
    } else if status.is_client_error() {
        IdentityProviderError::rejected(message)
    } else {
        IdentityProviderError::protocol(message)
    }
}

fn into_session(body: SessionBody) -> Result<AuthSession, IdentityProviderError> {
    Ok(AuthSession {
        identity: body.user.into_identity()?,
        token: SessionToken::new(body.access_token),
    })
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, IdentityProviderError> {
        let response = self.password_grant("signup", credentials).await?;
        let status = response.status();
        if status.is_success() {
            return match decode::<SignUpBody>(response).await? {
                SignUpBody::Session(session) => into_session(session),
                SignUpBody::User(_) => Err(IdentityProviderError::rejected(CONFIRMATION_REQUIRED)),
            };
        }
        Err(unexpected(response).await)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, IdentityProviderError> {
        let response = self
            .password_grant("token?grant_type=password", credentials)
            .await?;
        match response.status() {
            status if status.is_success() => into_session(decode(response).await?),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                let message = failure_message(response).await;
                debug!(message = %message, "password grant refused");
                Err(IdentityProviderError::InvalidCredentials)
            }
            _ => Err(unexpected(response).await),
        }
    }

    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Identity>, IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", self.api_key.as_str())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport_error)?;
        match response.status() {
            status if status.is_success() => {
                decode::<UserBody>(response).await?.into_identity().map(Some)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(unexpected(response).await),
        }
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), IdentityProviderError> {
        let response = self
            .post("logout")
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport_error)?;
        match response.status() {
            status if status.is_success() => Ok(()),
            // Already expired or revoked.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            _ => Err(unexpected(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn provider() -> (MockServer, GoTrueIdentityProvider) {
        let server = MockServer::start().await;
        let url = Url::parse(&server.uri()).expect("mock server url");
        let provider = GoTrueIdentityProvider::new(&url, "anon-key").expect("client");
        (server, provider)
    }

    fn credentials() -> Credentials {
        Credentials::try_from_parts("ada@example.com", "hunter22").expect("credentials")
    }

    fn session_json() -> serde_json::Value {
        json!({
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {"id": USER_ID, "email": "ada@example.com"}
        })
    }

    #[rstest]
    #[tokio::test]
    async fn sign_in_posts_password_grant() {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", "anon-key"))
            .and(body_json(json!({"email": "ada@example.com", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
            .expect(1)
            .mount(&server)
            .await;

        let session = provider.sign_in(&credentials()).await.expect("session");

        assert_eq!(session.token.expose(), "jwt-token");
        assert_eq!(session.identity.id.to_string(), USER_ID);
        assert_eq!(session.identity.email.as_ref(), "ada@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn bad_password_is_invalid_credentials() {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let err = provider.sign_in(&credentials()).await.expect_err("rejected");

        assert_eq!(err, IdentityProviderError::InvalidCredentials);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_sign_up_is_rejected_with_provider_message() {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"code": 422, "msg": "User already registered"})),
            )
            .mount(&server)
            .await;

        let err = provider.sign_up(&credentials()).await.expect_err("rejected");

        assert_eq!(err, IdentityProviderError::rejected("User already registered"));
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_awaiting_confirmation_is_rejected() {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": USER_ID, "email": "ada@example.com"})),
            )
            .mount(&server)
            .await;

        let err = provider.sign_up(&credentials()).await.expect_err("no session");

        assert_eq!(err, IdentityProviderError::rejected(CONFIRMATION_REQUIRED));
    }

    #[rstest]
    #[case(401, true)]
    #[case(403, true)]
    #[case(200, false)]
    #[tokio::test]
    async fn resolve_maps_rejected_tokens_to_none(#[case] status: u16, #[case] expect_none: bool) {
        let (server, provider) = provider().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", "Bearer jwt-token"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({"id": USER_ID, "email": "ada@example.com"})),
            )
            .mount(&server)
            .await;

        let resolved = provider
            .resolve(&SessionToken::new("jwt-token"))
            .await
            .expect("resolve");

        assert_eq!(resolved.is_none(), expect_none);
    }

    #[rstest]
    #[tokio::test]
    async fn server_errors_are_unavailable() {
        let (server, provider) = provider().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider
            .resolve(&SessionToken::new("jwt-token"))
            .await
            .expect_err("unavailable");

        assert!(matches!(err, IdentityProviderError::Unavailable { .. }));
    }

    #[rstest]
    #[case(429, "rate limited")]
    #[case(502, "bad gateway")]
    #[tokio::test]
    async fn throttled_or_failing_token_endpoint_is_unavailable(
        #[case] status: u16,
        #[case] msg: &str,
    ) {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"msg": msg})))
            .mount(&server)
            .await;

        let err = provider.sign_in(&credentials()).await.expect_err("unavailable");

        assert_eq!(err, IdentityProviderError::unavailable(msg));
    }

    #[rstest]
    #[case(422)]
    #[case(404)]
    #[tokio::test]
    async fn other_client_errors_on_user_lookup_are_rejections(#[case] status: u16) {
        let (server, provider) = provider().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"msg": "token is malformed"})),
            )
            .mount(&server)
            .await;

        let err = provider
            .resolve(&SessionToken::new("jwt-token"))
            .await
            .expect_err("rejected");

        assert_eq!(err, IdentityProviderError::rejected("token is malformed"));
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_throttling_is_unavailable() {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = provider.sign_up(&credentials()).await.expect_err("throttled");

        assert!(matches!(err, IdentityProviderError::Unavailable { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn sign_out_tolerates_expired_tokens() {
        let (server, provider) = provider().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        provider
            .sign_out(&SessionToken::new("stale"))
            .await
            .expect("treated as signed out");
    }
}
