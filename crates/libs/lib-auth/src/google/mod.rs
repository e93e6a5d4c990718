//! # Google Sign-In
//!
//! OAuth 2.0 authorization code flow against Google, with PKCE.
//!
//! The web layer talks to the identity provider only through the
//! [`OAuthProvider`] trait, so handlers can be exercised without network access.
//!
//! ## Flow
//!
//! 1. [`OAuthProvider::authorize`] produces a [`LoginRedirect`]: the consent URL
//!    plus the CSRF state and PKCE verifier the caller must keep in the session.
//! 2. Google redirects back with `code` and `state`.
//! 3. [`OAuthProvider::exchange_code`] trades the code for an access token and
//!    returns the signed-in [`GoogleProfile`].

use async_trait::async_trait;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const SCOPES: [&str; 3] = ["openid", "email", "profile"];

/// Where to send the browser, and what to remember until it comes back.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: Option<String>,
}

/// Profile returned by the OpenID Connect userinfo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleProfile {
    /// Stable Google account id
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// An OAuth identity provider.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Build the consent redirect for a new sign-in attempt.
    fn authorize(&self) -> LoginRedirect;

    /// Exchange an authorization code for the user's profile.
    async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: Option<String>,
    ) -> Result<GoogleProfile>;
}

type ConfiguredClient = BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Google implementation of [`OAuthProvider`].
pub struct GoogleOAuth {
    client: ConfiguredClient,
    http: reqwest::Client,
    userinfo_url: String,
}

impl GoogleOAuth {
    /// Create a Google client.
    ///
    /// `client_secret` may be absent; Google will then reject the token
    /// exchange, but the consent redirect still works.
    pub fn new(
        client_id: String,
        client_secret: Option<String>,
        redirect_url: String,
    ) -> Result<Self> {
        let mut client = BasicClient::new(ClientId::new(client_id))
            .set_auth_uri(
                AuthUrl::new(GOOGLE_AUTH_URL.to_string())
                    .map_err(|e| Error::InvalidUrl(e.to_string()))?,
            )
            .set_token_uri(
                TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
                    .map_err(|e| Error::InvalidUrl(e.to_string()))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(redirect_url).map_err(|e| Error::InvalidUrl(e.to_string()))?,
            );

        if let Some(secret) = client_secret {
            client = client.set_client_secret(ClientSecret::new(secret));
        }

        // Token requests must not follow redirects.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            http,
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        })
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuth {
    fn authorize(&self) -> LoginRedirect {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge);
        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (url, csrf_state) = request.url();

        LoginRedirect {
            url: url.to_string(),
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: Some(pkce_verifier.secret().clone()),
        }
    }

    async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: Option<String>,
    ) -> Result<GoogleProfile> {
        let mut request = self.client.exchange_code(AuthorizationCode::new(code));
        if let Some(verifier) = pkce_verifier {
            request = request.set_pkce_verifier(PkceCodeVerifier::new(verifier));
        }

        let token = request
            .request_async(&self.http)
            .await
            .map_err(|e| Error::TokenExchange(e.to_string()))?;
        debug!("[GOOGLE] Token exchange succeeded");

        let profile = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| Error::Profile(e.to_string()))?
            .json::<GoogleProfile>()
            .await
            .map_err(|e| Error::Profile(e.to_string()))?;

        debug!("[GOOGLE] Fetched profile for sub {}", profile.sub);
        Ok(profile)
    }
}
