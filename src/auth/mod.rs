//! Sign-in, sign-up and the local session.

mod model;

pub use model::{AuthResponse, SignInRequest, SignUpRequest};

use crate::api::{self, RequestOptions};
use crate::core::{SvClient, SvError, User};
use crate::fallback::Endpoint;

/// Signs in and persists the returned session.
///
/// A wrong password is reported as `SvError::Api` with the backend's message. When the
/// backend is unreachable the call fails, unless the client is in demo mode, where a demo
/// session is created instead.
///
/// # Errors
///
/// Returns `SvError::Api` for rejected credentials and the transport error when offline
/// outside demo mode.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, password), err))]
pub async fn sign_in(client: &SvClient, email: &str, password: &str) -> Result<AuthResponse, SvError> {
    let req = SignInRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    api::post_as(client, Endpoint::SignIn.path(), &req, &RequestOptions::default()).await
}

/// Creates an account and persists the returned session.
///
/// # Errors
///
/// Same as [`sign_in`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, password), err))]
pub async fn sign_up(
    client: &SvClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AuthResponse, SvError> {
    let req = SignUpRequest {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    api::post_as(client, Endpoint::SignUp.path(), &req, &RequestOptions::default()).await
}

/// Forgets the stored session and every cached response.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub async fn sign_out(client: &SvClient) -> Result<(), SvError> {
    client.session().clear()?;
    client.clear_cache().await;
    Ok(())
}

/// The signed-in user as last persisted.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn current_user(client: &SvClient) -> Result<Option<User>, SvError> {
    client.session().user()
}
