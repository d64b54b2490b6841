//! Wire payloads of the space service.

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

/// Body of create and delete; the service keys spaces by `dbName`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SpaceNameRequest {
    #[serde(rename = "dbName")]
    pub db_name: String,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SpacesResponse {
    #[serde(default)]
    pub spaces: Option<Vec<String>>,
}
