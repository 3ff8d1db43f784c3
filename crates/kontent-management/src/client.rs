//! Management API client
//!
//! Implements [`ManagementClient`] over the project-scoped REST endpoints.
//! Every request is authenticated with the project's management API key and
//! retried on transient failures.

use async_trait::async_trait;
use kontent_import_types::{
    AssetContract, AssetData, AssetFolderContract, AssetFolderData, ContentItemContract,
    ContentItemData, ContentTypeContract, ContentTypeData, ContentTypeSnippetContract,
    ContentTypeSnippetData, FileReference, LanguageContract, LanguageData, LanguagePatch,
    LanguageVariantContract, LanguageVariantData, ManagementClient, ManagementError,
    ManagementResult, Reference, TaxonomyContract, TaxonomyData, UploadBinaryFileData,
};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::{config::ManagementClientConfig, retry::with_retry};

const CONTINUATION_HEADER: &str = "x-continuation";

/// reqwest-backed client for one target project
pub struct KontentManagementClient {
    http: Client,
    config: ManagementClientConfig,
}

#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    languages: Vec<LanguageContract>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    continuation_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct FoldersRequest<'a> {
    folders: &'a [AssetFolderData],
}

#[derive(Debug, Deserialize)]
struct FoldersResponse {
    folders: Vec<AssetFolderContract>,
}

/// Error body returned by the management API
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    validation_errors: Vec<ApiValidationError>,
}

#[derive(Debug, Deserialize)]
struct ApiValidationError {
    message: String,
    #[serde(default)]
    path: Option<String>,
}

impl KontentManagementClient {
    pub fn new(config: ManagementClientConfig) -> ManagementResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ManagementError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.project_url(), path)
    }

    fn variant_path(item_codename: &str, language_codename: &str) -> String {
        format!(
            "/items/codename/{}/variants/codename/{}",
            urlencoding::encode(item_codename),
            urlencoding::encode(language_codename)
        )
    }

    /// Send a request built by `build`, rebuilding it for every retry
    async fn execute<B>(&self, operation: &str, build: B) -> ManagementResult<Response>
    where
        B: Fn() -> RequestBuilder + Send + Sync,
    {
        let build = &build;
        with_retry(
            move || async move {
                let response = build()
                    .bearer_auth(&self.config.api_key)
                    .send()
                    .await
                    .map_err(|e| ManagementError::Transport(e.to_string()))?;
                error_for_status(response).await
            },
            &self.config.retry,
            operation,
        )
        .await
    }

    async fn post_json<D, T>(&self, operation: &str, path: &str, data: &D) -> ManagementResult<T>
    where
        D: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("Management API request: POST {}", path);
        let response = self
            .execute(operation, || self.http.post(&url).json(data))
            .await?;
        parse_json(response).await
    }

    async fn put_empty(&self, operation: &str, path: &str) -> ManagementResult<()> {
        let url = self.url(path);
        debug!("Management API request: PUT {}", path);
        self.execute(operation, || self.http.put(&url)).await?;
        Ok(())
    }
}

async fn error_for_status(response: Response) -> ManagementResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &str) -> ManagementError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(error) => ManagementError::Api {
            status,
            message: error.message,
            error_code: error.error_code,
            validation_errors: error
                .validation_errors
                .into_iter()
                .map(|v| match v.path {
                    Some(path) => format!("{}: {}", path, v.message),
                    None => v.message,
                })
                .collect(),
        },
        Err(_) => ManagementError::Api {
            status,
            message: body.to_string(),
            error_code: None,
            validation_errors: Vec::new(),
        },
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> ManagementResult<T> {
    let body = response
        .text()
        .await
        .map_err(|e| ManagementError::Transport(format!("Failed to read response: {}", e)))?;

    serde_json::from_str(&body).map_err(|e| {
        ManagementError::InvalidResponse(format!(
            "Failed to parse response: {} - Body: {}",
            e, body
        ))
    })
}

#[async_trait]
impl ManagementClient for KontentManagementClient {
    async fn list_languages(&self) -> ManagementResult<Vec<LanguageContract>> {
        let url = self.url("/languages");
        let mut languages = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            debug!("Management API request: GET /languages");
            let token = continuation.clone();
            let response = self
                .execute("List languages", || {
                    let request = self.http.get(&url);
                    match &token {
                        Some(token) => request.header(CONTINUATION_HEADER, token),
                        None => request,
                    }
                })
                .await?;
            let page: LanguagesResponse = parse_json(response).await?;
            languages.extend(page.languages);

            continuation = page.pagination.and_then(|p| p.continuation_token);
            if continuation.is_none() {
                return Ok(languages);
            }
        }
    }

    async fn add_language(&self, data: &LanguageData) -> ManagementResult<LanguageContract> {
        self.post_json("Add language", "/languages", data).await
    }

    async fn modify_language(
        &self,
        language: &Reference,
        operations: &[LanguagePatch],
    ) -> ManagementResult<LanguageContract> {
        let path = format!("/languages/{}", language.path_segment());
        let url = self.url(&path);
        debug!("Management API request: PATCH {}", path);
        let response = self
            .execute("Modify language", || self.http.patch(&url).json(operations))
            .await?;
        parse_json(response).await
    }

    async fn add_taxonomy(&self, data: &TaxonomyData) -> ManagementResult<TaxonomyContract> {
        self.post_json("Add taxonomy", "/taxonomies", data).await
    }

    async fn add_content_type_snippet(
        &self,
        data: &ContentTypeSnippetData,
    ) -> ManagementResult<ContentTypeSnippetContract> {
        self.post_json("Add content type snippet", "/snippets", data)
            .await
    }

    async fn add_content_type(
        &self,
        data: &ContentTypeData,
    ) -> ManagementResult<ContentTypeContract> {
        self.post_json("Add content type", "/types", data).await
    }

    async fn add_asset_folders(
        &self,
        folders: &[AssetFolderData],
    ) -> ManagementResult<Vec<AssetFolderContract>> {
        let response: FoldersResponse = self
            .post_json("Add asset folders", "/folders", &FoldersRequest { folders })
            .await?;
        Ok(response.folders)
    }

    async fn upload_binary_file(
        &self,
        data: &UploadBinaryFileData,
    ) -> ManagementResult<FileReference> {
        let path = format!("/files/{}", urlencoding::encode(&data.file_name));
        let url = self.url(&path);
        debug!(
            "Management API request: POST {} ({} bytes)",
            path,
            data.data.len()
        );
        let response = self
            .execute("Upload binary file", || {
                self.http
                    .post(&url)
                    .header(header::CONTENT_TYPE, &data.content_type)
                    .header(header::CONTENT_LENGTH, data.data.len())
                    .body(data.data.clone())
            })
            .await?;
        parse_json(response).await
    }

    async fn add_asset(&self, data: &AssetData) -> ManagementResult<AssetContract> {
        self.post_json("Add asset", "/assets", data).await
    }

    async fn add_content_item(
        &self,
        data: &ContentItemData,
    ) -> ManagementResult<ContentItemContract> {
        self.post_json("Add content item", "/items", data).await
    }

    async fn upsert_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
        data: &LanguageVariantData,
    ) -> ManagementResult<LanguageVariantContract> {
        let path = Self::variant_path(item_codename, language_codename);
        let url = self.url(&path);
        debug!("Management API request: PUT {}", path);
        let response = self
            .execute("Upsert language variant", || self.http.put(&url).json(data))
            .await?;
        parse_json(response).await
    }

    async fn publish_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
    ) -> ManagementResult<()> {
        let path = format!(
            "{}/publish",
            Self::variant_path(item_codename, language_codename)
        );
        self.put_empty("Publish language variant", &path).await
    }

    async fn change_workflow_step(
        &self,
        item_codename: &str,
        language_codename: &str,
        workflow_step_id: &str,
    ) -> ManagementResult<()> {
        let path = format!(
            "{}/workflow/{}",
            Self::variant_path(item_codename, language_codename),
            urlencoding::encode(workflow_step_id)
        );
        self.put_empty("Change workflow step", &path).await
    }
}
