use super::{FavoriteStore, TABLE_NAME};
use crate::models::{Favorite, NewFavorite};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

/// `FavoriteStore` speaking the PostgREST dialect used by Supabase.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let api_key = api_key.into();
        if base_url.trim().is_empty() {
            return Err(Error::Config("store url is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(Error::Config("store api key is empty".to_string()));
        }

        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE_NAME)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// Turn a non-success response into `Error::Remote`
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|err| err.message)
        .unwrap_or(body);

    Err(Error::Remote {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl FavoriteStore for RestStore {
    async fn list(&self) -> Result<Vec<Favorite>> {
        let url = self.table_url();
        debug!(%url, "listing favorites");

        let response = self
            .authorize(self.http.get(&url))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        let favorites: Vec<Favorite> = serde_json::from_str(&body)?;

        debug!(count = favorites.len(), "listed favorites");
        Ok(favorites)
    }

    async fn insert(&self, favorite: &NewFavorite) -> Result<()> {
        let url = self.table_url();
        debug!(%url, name = %favorite.name, "inserting favorite");

        let response = self
            .authorize(self.http.post(&url))
            .header("Prefer", "return=minimal")
            .json(&[favorite])
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        assert!(matches!(RestStore::new("", "key"), Err(Error::Config(_))));
        assert!(matches!(RestStore::new("https://x.supabase.co", " "), Err(Error::Config(_))));
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new("https://x.supabase.co/", "key").unwrap();
        assert_eq!(store.table_url(), "https://x.supabase.co/rest/v1/Favorites");
    }

    #[tokio::test]
    async fn test_list_request_and_decode() {
        let body = r#"[
            {"id":2,"name":"Dune","category":"Books","note":"reread","created_at":"2024-05-02T09:00:00+00:00"},
            {"id":1,"name":"Coffee","category":"Drinks","note":"","created_at":"2024-05-01T09:00:00+00:00"}
        ]"#;
        let (url, server) = serve_once("200 OK", body).await;
        let store = RestStore::new(url, "secret-key").unwrap();

        let favorites = store.list().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].name, "Dune");
        assert_eq!(favorites[1].id, Some(1));

        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /rest/v1/Favorites?"));
        assert!(request_line.contains("select=*") || request_line.contains("select=%2A"));
        assert!(request_line.contains("order=created_at.desc"));
        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("apikey: secret-key"));
        assert!(lower.contains("authorization: bearer secret-key"));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (url, server) = serve_once("200 OK", "[]").await;
        let store = RestStore::new(url, "k").unwrap();

        assert!(store.list().await.unwrap().is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_sends_array_payload() {
        let (url, server) = serve_once("201 Created", "").await;
        let store = RestStore::new(url, "k").unwrap();

        store
            .insert(&NewFavorite::new("Coffee", "Drinks", ""))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /rest/v1/Favorites "));
        assert!(request.to_ascii_lowercase().contains("prefer: return=minimal"));
        let payload = request.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"name": "Coffee", "category": "Drinks", "note": ""}])
        );
    }

    #[tokio::test]
    async fn test_remote_error_uses_postgrest_message() {
        let body = r#"{"code":"42P01","details":null,"hint":null,"message":"relation \"public.Favorites\" does not exist"}"#;
        let (url, server) = serve_once("404 Not Found", body).await;
        let store = RestStore::new(url, "k").unwrap();

        let err = store.list().await.unwrap_err();
        server.await.unwrap();

        match err {
            Error::Remote { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("does not exist"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remote_error_falls_back_to_raw_body() {
        let (url, server) = serve_once("401 Unauthorized", "no api key").await;
        let store = RestStore::new(url, "k").unwrap();

        let err = store
            .insert(&NewFavorite::new("Coffee", "Drinks", ""))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, Error::Remote { status: 401, ref message } if message == "no api key"));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = RestStore::new(format!("http://{addr}"), "k").unwrap();
        assert!(matches!(store.list().await, Err(Error::Http(_))));
    }
}
