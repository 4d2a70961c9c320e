//! `/api/auth`: registration, login, session and the address book.

use super::error::ApiError;
use super::extract::{token_from_cookie, ApiJson, AuthUser, TOKEN_COOKIE};
use super::validate::{is_email, required, AddressFields};
use super::AppState;
use crate::auth::{hash_password, verify_password, AuthError};
use crate::model::{AddressId, FullName, NewAddress, Role, User, UserCreate};
use crate::user_actor::UserError;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", get(logout))
        .route("/users/me/addresses", get(list_addresses).post(add_address))
        .route("/users/me/addresses/:address_id", delete(delete_address))
}

fn session_cookie(token: &str, max_age: u64) -> String {
    format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={max_age}")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullNameBody {
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressBody {
    #[serde(flatten)]
    fields: AddressFields,
    #[serde(default)]
    is_default: bool,
}

impl AddressBody {
    fn check(&self) -> Result<NewAddress, ApiError> {
        let a = self.fields.check()?;
        Ok(NewAddress {
            street: a.street,
            city: a.city,
            state: a.state,
            pincode: a.pincode,
            country: a.country,
            is_default: self.is_default,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    full_name: Option<FullNameBody>,
    role: Option<String>,
    #[serde(default)]
    addresses: Vec<AddressBody>,
}

async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
    let username = body.username.as_deref().map(str::trim).unwrap_or_default();
    if username.chars().count() < 3 {
        return Err(ApiError::bad_request("Username must be at least 3 characters long"));
    }
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    if !is_email(email) {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    let password = body.password.clone().unwrap_or_default();
    if password.chars().count() < 6 {
        return Err(ApiError::bad_request("Password must be 6 characters long"));
    }
    let (first_name, last_name) = match &body.full_name {
        Some(name) => (name.first_name.clone(), name.last_name.clone()),
        None => (None, None),
    };
    let first_name = required(&first_name, "First Name is required!")?;
    let last_name = required(&last_name, "Last Name is required")?;
    let role = match body.role.as_deref() {
        None => Role::User,
        Some(role) => role
            .parse()
            .map_err(|_| ApiError::bad_request("Role must be either user or seller"))?,
    };
    let addresses = body
        .addresses
        .iter()
        .map(AddressBody::check)
        .collect::<Result<Vec<_>, _>>()?;

    let user = state
        .users
        .register(UserCreate {
            username: username.to_string(),
            email: email.to_lowercase(),
            password_hash: hash_password(password, state.bcrypt_cost).await?,
            full_name: FullName {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            },
            role,
            addresses,
        })
        .await?;
    info!(user = %user.id, role = %user.role, "User registered");

    let token = state.tokens.issue(&user)?;
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, session_cookie(&token, state.tokens.ttl().as_secs()))],
        Json(json!({ "message": "User registered sucessfully", "user": user })),
    ))
}

#[derive(Deserialize)]
struct LoginBody {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
    let username = body.username.filter(|u| !u.trim().is_empty());
    let email = body.email.filter(|e| !e.trim().is_empty());
    if email.as_deref().is_some_and(|e| !is_email(e.trim())) {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    let password = body.password.unwrap_or_default();
    if password.chars().count() < 6 {
        return Err(ApiError::bad_request("Password should be 6 characters long"));
    }
    if username.is_none() && email.is_none() {
        return Err(ApiError::bad_request("Either username or email is required"));
    }

    let user: User = state
        .users
        .find_by_login(
            username.map(|u| u.trim().to_string()),
            email.map(|e| e.trim().to_lowercase()),
        )
        .await?
        .ok_or(UserError::InvalidCredentials)?;
    if !verify_password(password, user.password_hash.clone()).await? {
        return Err(UserError::InvalidCredentials.into());
    }

    let token = state.tokens.issue(&user)?;
    Ok((
        [(SET_COOKIE, session_cookie(&token, state.tokens.ttl().as_secs()))],
        Json(json!({ "message": "login successful", "user": user })),
    ))
}

async fn me(caller: AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "message": "User fetched sucessfully", "user": caller.claims }))
}

/// Denylists the cookie token so it cannot be replayed, then clears the cookie.
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = token_from_cookie(&headers).ok_or(AuthError::MissingToken)?;
    // Only tokens this service signed reach the denylist.
    state.tokens.verify(&token)?;
    state.denylist.revoke(&token);
    Ok((
        [(SET_COOKIE, session_cookie("", 0))],
        Json(json!({ "message": "Logout Sucess" })),
    ))
}

async fn list_addresses(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.users.user(caller.id()).await?;
    Ok(Json(json!({
        "message": "User address fetched sucessfully",
        "addresses": user.addresses,
    })))
}

async fn add_address(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<AddressBody>,
) -> Result<impl IntoResponse, ApiError> {
    let address = state.users.add_address(caller.id(), body.check()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Address added successfully", "address": address })),
    ))
}

async fn delete_address(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(address_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id: AddressId = address_id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid address id"))?;
    let addresses = state.users.remove_address(caller.id(), id).await?;
    Ok(Json(json!({
        "message": "Address deleted successfully",
        "addresses": addresses,
    })))
}
