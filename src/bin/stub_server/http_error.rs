use super::*;

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({"message": msg}))).into_response()
}

pub(super) fn unauthorized(msg: &str) -> Response {
    message(StatusCode::UNAUTHORIZED, msg)
}

pub(super) fn bad_request(msg: &str) -> Response {
    message(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn not_found(msg: &str) -> Response {
    message(StatusCode::NOT_FOUND, msg)
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    message(StatusCode::INTERNAL_SERVER_ERROR, &format!("{:#}", err))
}

pub(super) fn ok_message(msg: &str) -> Response {
    message(StatusCode::OK, msg)
}

/// Malformed or missing JSON bodies get the same `{message}` shape as every other error.
pub(super) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => Err(bad_request(&rejection.body_text())),
    }
}
