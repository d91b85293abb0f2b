use super::error::ApiError;
use crate::shared::config::AppConfig;
use crate::shared::storage;
use contracts::shared::server_errors::ServerErrors;
use gloo_net::http::{Request, RequestBuilder};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub type Query = [(&'static str, String)];

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base())
    }

    /// Absolute URL for an API path such as `/api/stock/location/3/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match storage::get_access_token() {
            Some(token) => builder.header("Authorization", &format!("Token {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<T, ApiError> {
        let request = request.map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = request.send().await.map_err(|e| {
            log::error!("{} {} failed: {}", method, url, e);
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let result = decode_response(status, &text);
        if let Err(e) = &result {
            log::warn!("{} {} -> {}", method, url, e);
        } else {
            log::debug!("{} {} -> {}", method, url, status);
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let url = self.url(path);
        let builder = Request::get(&url).query(query.iter().map(|(k, v)| (*k, v.as_str())));
        let request = self.prepare(builder).build();
        self.send("GET", &url, request).await
    }

    /// GET with a typed filter struct encoded as the query string
    pub async fn get_filtered<F: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &F,
    ) -> Result<T, ApiError> {
        let url = filtered_url(&self.url(path), filters)?;
        let request = self.prepare(Request::get(&url)).build();
        self.send("GET", &url, request).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.prepare(Request::post(&url)).json(body);
        self.send("POST", &url, request).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.prepare(Request::patch(&url)).json(body);
        self.send("PATCH", &url, request).await
    }

    /// DELETE, optionally with a JSON body carrying delete options
    pub async fn delete<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError> {
        let url = self.url(path);
        let builder = self.prepare(Request::delete(&url));
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        };
        let _: serde_json::Value = self.send("DELETE", &url, request).await?;
        Ok(())
    }
}

/// Maps a status code and body text to a typed result.
///
/// Empty bodies decode as JSON `null`, so `()`, `Option<_>` and `Value`
/// accept a 204.
pub fn decode_response<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    if status == 404 {
        return Err(ApiError::NotFound);
    }
    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            errors: ServerErrors::parse(text),
        });
    }
    let body = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Appends `filters` as a query string; empty filters leave the URL untouched
pub fn filtered_url<F: Serialize>(url: &str, filters: &F) -> Result<String, ApiError> {
    let query = serde_qs::to_string(filters).map_err(|e| ApiError::Encode(e.to_string()))?;
    if query.is_empty() {
        Ok(url.to_string())
    } else {
        Ok(format!("{}?{}", url, query))
    }
}

/// The client provided by the app root
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided in context (provide it in app root)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_stock_location::aggregate::StockLocation;
    use contracts::domain::common::ApiEndpoint;

    #[test]
    fn test_decode_success() {
        let location: StockLocation =
            decode_response(200, r#"{"pk": 1, "name": "Warehouse"}"#).unwrap();
        assert_eq!(location.name, "Warehouse");
    }

    #[test]
    fn test_decode_empty_body() {
        let value: serde_json::Value = decode_response(204, "").unwrap();
        assert!(value.is_null());
        let unit: () = decode_response(204, "  ").unwrap();
        assert_eq!(unit, ());
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode_response::<serde_json::Value>(404, "{}"),
            Err(ApiError::NotFound)
        );

        let err = decode_response::<serde_json::Value>(400, r#"{"parent": ["Invalid"]}"#)
            .unwrap_err();
        let errors = err.server_errors().unwrap();
        assert_eq!(errors.field("parent"), Some(&["Invalid".to_string()][..]));

        assert!(matches!(
            decode_response::<StockLocation>(200, "[]"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_urls() {
        let api = ApiClient::new("http://inv.local:8000/");
        assert_eq!(
            api.url(&ApiEndpoint::StockLocationList.url(Some(3))),
            "http://inv.local:8000/api/stock/location/3/"
        );
    }

    #[derive(Serialize)]
    struct Filters {
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<i64>,
        in_stock: bool,
    }

    #[test]
    fn test_filtered_url() {
        let url = filtered_url(
            "/api/stock/",
            &Filters {
                location: Some(7),
                in_stock: true,
            },
        )
        .unwrap();
        assert_eq!(url, "/api/stock/?location=7&in_stock=true");

        #[derive(Serialize)]
        struct NoFilters {}
        assert_eq!(filtered_url("/api/part/", &NoFilters {}).unwrap(), "/api/part/");
    }
}
