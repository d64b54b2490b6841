use super::*;

#[derive(Debug, serde::Deserialize)]
pub(super) struct SpaceNameRequest {
    #[serde(rename = "dbName", default)]
    db_name: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ListQuery {
    #[serde(default)]
    uninitialized: Option<String>,
}

fn required_name(req: SpaceNameRequest) -> Result<String, Response> {
    let name = req.db_name.trim();
    if name.is_empty() {
        return Err(bad_request("dbName is required"));
    }
    Ok(name.to_string())
}

pub(super) async fn create_space(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    body: Result<Json<SpaceNameRequest>, JsonRejection>,
) -> Response {
    let name = match json_body(body).and_then(required_name) {
        Ok(n) => n,
        Err(resp) => return resp,
    };

    let mut spaces = state.spaces.write().await;
    let owned = spaces.entry(subject.user.clone()).or_default();
    if owned.iter().any(|s| s.name == name) {
        return bad_request("Space already exists");
    }
    owned.push(Space {
        name: name.clone(),
        initialized: false,
    });
    tracing::info!(user = %subject.user, space = %name, "space created");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "Space created", "dbName": name})),
    )
        .into_response()
}

pub(super) async fn list_spaces(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Query(q): Query<ListQuery>,
) -> Response {
    let only_uninitialized = q.uninitialized.as_deref() == Some("true");
    let spaces = state.spaces.read().await;
    let names: Vec<String> = spaces
        .get(&subject.user)
        .map(|owned| {
            owned
                .iter()
                .filter(|s| !only_uninitialized || !s.initialized)
                .map(|s| s.name.clone())
                .collect()
        })
        .unwrap_or_default();
    Json(serde_json::json!({"spaces": names})).into_response()
}

pub(super) async fn delete_space(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    body: Result<Json<SpaceNameRequest>, JsonRejection>,
) -> Response {
    let name = match json_body(body).and_then(required_name) {
        Ok(n) => n,
        Err(resp) => return resp,
    };

    let mut spaces = state.spaces.write().await;
    let Some(owned) = spaces.get_mut(&subject.user) else {
        return not_found("Space not found");
    };
    let Some(pos) = owned.iter().position(|s| s.name == name) else {
        return not_found("Space not found");
    };
    owned.remove(pos);
    tracing::info!(user = %subject.user, space = %name, "space deleted");
    ok_message("Space deleted")
}
