//! User dispatch controller.
//!
//! Every method on `/` and `/users` reaches [`dispatch`], which maps the
//! method to a [`Verb`] and calls the matching service operation.

use crate::{
    responses::{created, ok, ApiResult},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::Method,
    response::Response,
    routing::any,
    Router,
};
use serde::Deserialize;
use std::fmt;
use tracing::debug;
use userbase_core::UserbaseError;

/// Operation requested by an inbound method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `GET`: one user by email, or all of them.
    Fetch,
    /// `POST`: create from the body.
    Create,
    /// `PUT`: overwrite from the body.
    Update,
    /// `DELETE`: remove by email.
    Delete,
}

impl TryFrom<&Method> for Verb {
    type Error = UserbaseError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        match *method {
            Method::GET => Ok(Self::Fetch),
            Method::POST => Ok(Self::Create),
            Method::PUT => Ok(Self::Update),
            Method::DELETE => Ok(Self::Delete),
            _ => Err(UserbaseError::MethodNotAllowed(method.to_string())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Query parameters accepted by the dispatcher.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    /// Selects a single user for fetch and delete.
    pub email: Option<String>,
}

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", any(dispatch))
        .route("/users", any(dispatch))
}

/// Dispatches a request to the user service.
///
/// `GET` with a non-empty `email` fetches one user and otherwise lists all
/// of them. `POST` and `PUT` pass the raw body through. `DELETE` reads the
/// `email` parameter.
///
/// The method is resolved before the query and body are looked at, so an
/// unknown method is always 405. Unreadable queries and bodies are
/// `InvalidInput`.
async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<UserQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    let verb = Verb::try_from(&method)?;
    let Query(query) = query.map_err(|e| UserbaseError::invalid_input(e.body_text()))?;
    let body = body.map_err(|e| UserbaseError::invalid_input(e.body_text()))?;
    let email = query.email.unwrap_or_default();
    debug!("Dispatching {} (email: {:?})", verb, email);

    let service = &state.user_service;
    let response = match verb {
        Verb::Fetch if email.is_empty() => ok(service.fetch_all().await?),
        Verb::Fetch => ok(service.fetch_one(&email).await?),
        Verb::Create => created(service.create(&body).await?),
        Verb::Update => ok(service.update(&body).await?),
        Verb::Delete => {
            service.delete(&email).await?;
            ok(())
        }
    };

    Ok(response)
}
