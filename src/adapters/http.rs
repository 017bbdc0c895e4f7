use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::settings::GlobalConfig;
use crate::domain::model::{
    Case, CaseImportInfo, Project, SmallVariantQueryV1, VarAnnoSetEntryV1, VarAnnoSetV1,
};
use crate::domain::ports::VarfishApi;
use crate::domain::query_settings::CaseQueryV1;
use crate::utils::error::{Result, VarfishError};

const MAX_ERROR_BODY_CHARS: usize = 500;

/// [`VarfishApi`] over HTTP with token authentication.
pub struct HttpVarfishClient {
    client: Client,
    base_url: Url,
}

impl HttpVarfishClient {
    pub fn new(config: &GlobalConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.varfish_server_url).map_err(|e| {
            VarfishError::InvalidConfigValueError {
                field: "varfish_server_url".to_string(),
                value: config.varfish_server_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;
        // Without a trailing slash, joining would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut auth = HeaderValue::from_str(&format!("Token {}", config.varfish_api_token))
            .map_err(|_| VarfishError::InvalidConfigValueError {
                field: "varfish_api_token".to_string(),
                value: "***".to_string(),
                reason: "Token contains characters not allowed in an HTTP header".to_string(),
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !config.verify_ssl {
            tracing::warn!("SSL certificate verification is disabled");
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(concat!("varfish-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| VarfishError::ConfigError {
                message: format!("cannot build URL for {}: {}", path, e),
            })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(VarfishError::HttpStatusError {
                status: status.as_u16(),
                url,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        Self::decode(response).await
    }

    /// Lists may come back bare or wrapped in a paginated `{"results": [...]}` envelope.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value: serde_json::Value = self.get_json(path, &[]).await?;
        let items = match value {
            serde_json::Value::Object(mut object) if object.contains_key("results") => object
                .remove("results")
                .unwrap_or(serde_json::Value::Array(Vec::new())),
            other => other,
        };
        Ok(serde_json::from_value(items)?)
    }

    async fn post_json<B: Serialize + ?Sized + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl VarfishApi for HttpVarfishClient {
    async fn project_list(&self) -> Result<Vec<Project>> {
        self.get_list("project/api/list/").await
    }

    async fn case_list(&self, project: Uuid) -> Result<Vec<Case>> {
        self.get_list(&format!("variants/api/case/list/{}/", project))
            .await
    }

    async fn case_retrieve(&self, case: Uuid) -> Result<Case> {
        self.get_json(&format!("variants/api/case/retrieve/{}/", case), &[])
            .await
    }

    async fn case_import_info_list(&self, project: Uuid) -> Result<Vec<CaseImportInfo>> {
        self.get_list(&format!("importer/api/case-import-info/{}/", project))
            .await
    }

    async fn small_var_query_list(&self, case: Uuid) -> Result<Vec<SmallVariantQueryV1>> {
        self.get_list(&format!("variants/api/query-case/list/{}/", case))
            .await
    }

    async fn small_var_query_create(
        &self,
        case: Uuid,
        query: &CaseQueryV1,
    ) -> Result<SmallVariantQueryV1> {
        self.post_json(&format!("variants/api/query-case/create/{}/", case), query)
            .await
    }

    async fn small_var_query_status(&self, query: Uuid) -> Result<serde_json::Value> {
        self.get_json(&format!("variants/api/query-case/status/{}/", query), &[])
            .await
    }

    async fn small_var_query_fetch_results(&self, query: Uuid) -> Result<serde_json::Value> {
        self.get_json(&format!("variants/api/query-case/results/{}/", query), &[])
            .await
    }

    async fn small_var_query_settings_shortcut(
        &self,
        case: Uuid,
        presets: &[(String, String)],
    ) -> Result<serde_json::Value> {
        self.get_json(
            &format!("variants/api/query-case/query-settings-shortcut/{}/", case),
            presets,
        )
        .await
    }

    async fn varannoset_list(&self, project: Uuid) -> Result<Vec<VarAnnoSetV1>> {
        self.get_list(&format!("varannos/api/varannoset/list/{}/", project))
            .await
    }

    async fn varannoset_retrieve(&self, varannoset: Uuid) -> Result<VarAnnoSetV1> {
        self.get_json(
            &format!("varannos/api/varannoset/retrieve/{}/", varannoset),
            &[],
        )
        .await
    }

    async fn varannosetentry_list(&self, varannoset: Uuid) -> Result<Vec<VarAnnoSetEntryV1>> {
        self.get_list(&format!("varannos/api/varannosetentry/list/{}/", varannoset))
            .await
    }
}
