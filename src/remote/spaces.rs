//! Space create/list/delete.

use reqwest::Method;

use super::http_client::parse_body;
use super::*;

impl RemoteClient {
    pub fn create_space(&self, auth: &Auth, name: &str) -> ClientResult<()> {
        let url = self.url(&auth.host, "/api/new")?;
        let body = serde_json::to_value(SpaceNameRequest {
            db_name: name.to_string(),
        })?;
        self.request(Method::POST, &url, Some(&body), Some(&auth.token))?;
        Ok(())
    }

    pub fn list_spaces(&self, auth: &Auth, filter: SpaceFilter) -> ClientResult<Vec<SpaceRef>> {
        let path = match filter {
            SpaceFilter::All => "/api/get-spaces",
            SpaceFilter::Uninitialized => "/api/get-spaces?uninitialized=true",
        };
        let url = self.url(&auth.host, path)?;
        let resp = self.request(Method::GET, &url, None, Some(&auth.token))?;
        let parsed: SpacesResponse = parse_body(&resp, "parse spaces")?;
        Ok(parsed
            .spaces
            .unwrap_or_default()
            .into_iter()
            .map(SpaceRef::new)
            .collect())
    }

    /// DELETE with a JSON body; the service does not take the name in the path.
    pub fn delete_space(&self, auth: &Auth, name: &str) -> ClientResult<()> {
        let url = self.url(&auth.host, "/api/delete")?;
        let body = serde_json::to_value(SpaceNameRequest {
            db_name: name.to_string(),
        })?;
        self.request(Method::DELETE, &url, Some(&body), Some(&auth.token))?;
        Ok(())
    }
}
