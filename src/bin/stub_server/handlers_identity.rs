use super::*;

#[derive(Debug, serde::Deserialize)]
pub(super) struct Credentials {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, serde::Serialize)]
struct LoginResponse {
    token: String,
    username: String,
}

pub(super) async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Response {
    let creds = match json_body(body) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    if creds.username.is_empty() || creds.password.is_empty() {
        return bad_request("Username and password are required");
    }

    let mut users = state.users.write().await;
    if users.contains_key(&creds.username) {
        return bad_request("User already exists");
    }
    users.insert(creds.username.clone(), creds.password);
    tracing::info!(user = %creds.username, "registered");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "User registered successfully"})),
    )
        .into_response()
}

pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Response {
    let creds = match json_body(body) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let valid = {
        let users = state.users.read().await;
        users
            .get(&creds.username)
            .is_some_and(|p| *p == creds.password)
    };
    if !valid {
        return unauthorized("Invalid credentials");
    }

    let token = match generate_token_secret() {
        Ok(t) => t,
        Err(err) => return internal_error(err),
    };
    state
        .sessions
        .write()
        .await
        .insert(hash_token(&token), creds.username.clone());
    tracing::info!(user = %creds.username, "logged in");

    Json(LoginResponse {
        token,
        username: creds.username,
    })
    .into_response()
}

pub(super) async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    headers: axum::http::HeaderMap,
) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if let Some(token) = token {
        state.sessions.write().await.remove(&hash_token(token));
    }
    tracing::info!(user = %subject.user, "logged out");
    ok_message("Logged out")
}
