//! In-memory management API used by the orchestrator tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use kontent_import_types::{
    AssetContract, AssetData, AssetFolderContract, AssetFolderData, BinaryFile,
    ContentItemContract, ContentItemData, ContentTypeContract, ContentTypeData,
    ContentTypeSnippetContract, ContentTypeSnippetData, FileReference, ImportEvent,
    ImportObserver, LanguageContract, LanguageData, LanguagePatch, LanguageVariantContract,
    LanguageVariantData, ManagementClient, ManagementError, ManagementResult, Reference,
    TaxonomyContract, TaxonomyData, UploadBinaryFileData, DEFAULT_LANGUAGE_ID,
};
use serde_json::{json, Value};

/// One request received by the mock
#[derive(Debug, Clone)]
pub struct Call {
    pub operation: &'static str,
    pub payload: Value,
}

/// Records every request and answers like a fresh target project
pub struct MockClient {
    calls: Mutex<Vec<Call>>,
    languages: Mutex<Vec<LanguageContract>>,
    uploads: Mutex<Vec<UploadBinaryFileData>>,
    failing: Mutex<Option<(&'static str, u16)>>,
    folder_rewrite: Mutex<Option<(String, Option<String>)>>,
    next_id: AtomicUsize,
}

pub fn language(id: &str, codename: &str, is_active: bool) -> LanguageContract {
    LanguageContract {
        id: id.to_string(),
        name: codename.to_string(),
        codename: codename.to_string(),
        external_id: None,
        is_active,
        is_default: id == DEFAULT_LANGUAGE_ID,
        fallback_language: None,
    }
}

impl MockClient {
    /// Target whose only language is the default one, `en-US`
    pub fn new() -> Self {
        Self::with_languages(vec![language(DEFAULT_LANGUAGE_ID, "en-US", true)])
    }

    pub fn with_languages(languages: Vec<LanguageContract>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            languages: Mutex::new(languages),
            uploads: Mutex::new(Vec::new()),
            failing: Mutex::new(None),
            folder_rewrite: Mutex::new(None),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Make every call of `operation` fail with the given status
    pub fn fail_on(self, operation: &'static str, status: u16) -> Self {
        *self.failing.lock().unwrap() = Some((operation, status));
        self
    }

    /// Answer folder creation with `replacement` as the external id of the
    /// folder created for `external_id`; `None` drops the external id
    pub fn rewrite_folder_external_id(
        self,
        external_id: &str,
        replacement: Option<&str>,
    ) -> Self {
        *self.folder_rewrite.lock().unwrap() =
            Some((external_id.to_string(), replacement.map(str::to_string)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation == operation)
            .collect()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().iter().map(|call| call.operation).collect()
    }

    pub fn languages(&self) -> Vec<LanguageContract> {
        self.languages.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<UploadBinaryFileData> {
        self.uploads.lock().unwrap().clone()
    }

    fn generate_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn receive(&self, operation: &'static str, payload: Value) -> ManagementResult<()> {
        self.calls.lock().unwrap().push(Call { operation, payload });
        match *self.failing.lock().unwrap() {
            Some((failing, status)) if failing == operation => Err(ManagementError::Api {
                status,
                message: format!("{} rejected", operation),
                error_code: Some(5),
                validation_errors: Vec::new(),
            }),
            _ => Ok(()),
        }
    }

    fn created_external_id(&self, external_id: &str) -> Option<String> {
        match &*self.folder_rewrite.lock().unwrap() {
            Some((from, replacement)) if from == external_id => replacement.clone(),
            _ => Some(external_id.to_string()),
        }
    }

    fn created_folders(&self, folders: &[AssetFolderData]) -> Vec<AssetFolderContract> {
        folders
            .iter()
            .map(|folder| AssetFolderContract {
                id: self.generate_id("folder"),
                name: folder.name.clone(),
                external_id: self.created_external_id(&folder.external_id),
                folders: self.created_folders(&folder.folders),
            })
            .collect()
    }
}

#[async_trait]
impl ManagementClient for MockClient {
    async fn list_languages(&self) -> ManagementResult<Vec<LanguageContract>> {
        self.receive("list_languages", Value::Null)?;
        Ok(self.languages())
    }

    async fn add_language(&self, data: &LanguageData) -> ManagementResult<LanguageContract> {
        self.receive("add_language", serde_json::to_value(data)?)?;
        let created = LanguageContract {
            id: self.generate_id("language"),
            name: data.name.clone(),
            codename: data.codename.clone(),
            external_id: data.external_id.clone(),
            is_active: data.is_active,
            is_default: false,
            fallback_language: data.fallback_language.clone(),
        };
        self.languages.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn modify_language(
        &self,
        language: &Reference,
        operations: &[LanguagePatch],
    ) -> ManagementResult<LanguageContract> {
        self.receive(
            "modify_language",
            json!({ "language": language, "operations": operations }),
        )?;

        let mut languages = self.languages.lock().unwrap();
        let target = languages
            .iter_mut()
            .find(|l| Some(l.id.as_str()) == language.as_id())
            .ok_or_else(|| ManagementError::Api {
                status: 404,
                message: "language not found".to_string(),
                error_code: None,
                validation_errors: Vec::new(),
            })?;
        for operation in operations {
            match operation.property_name.as_str() {
                "codename" => target.codename = operation.value.as_str().unwrap().to_string(),
                "is_active" => target.is_active = operation.value.as_bool().unwrap(),
                _ => {}
            }
        }
        Ok(target.clone())
    }

    async fn add_taxonomy(&self, data: &TaxonomyData) -> ManagementResult<TaxonomyContract> {
        self.receive("add_taxonomy", serde_json::to_value(data)?)?;
        Ok(TaxonomyContract {
            id: self.generate_id("taxonomy"),
            name: data.name.clone(),
            codename: data.codename.clone(),
            external_id: data.external_id.clone(),
            last_modified: None,
            terms: data.terms.clone(),
        })
    }

    async fn add_content_type_snippet(
        &self,
        data: &ContentTypeSnippetData,
    ) -> ManagementResult<ContentTypeSnippetContract> {
        self.receive("add_content_type_snippet", serde_json::to_value(data)?)?;
        Ok(ContentTypeSnippetContract {
            id: self.generate_id("snippet"),
            name: data.name.clone(),
            codename: data.codename.clone(),
            external_id: data.external_id.clone(),
            last_modified: None,
            elements: data.elements.clone(),
        })
    }

    async fn add_content_type(
        &self,
        data: &ContentTypeData,
    ) -> ManagementResult<ContentTypeContract> {
        self.receive("add_content_type", serde_json::to_value(data)?)?;
        Ok(ContentTypeContract {
            id: self.generate_id("type"),
            name: data.name.clone(),
            codename: data.codename.clone(),
            external_id: data.external_id.clone(),
            last_modified: None,
            elements: data.elements.clone(),
            content_groups: data.content_groups.clone(),
        })
    }

    async fn add_asset_folders(
        &self,
        folders: &[AssetFolderData],
    ) -> ManagementResult<Vec<AssetFolderContract>> {
        self.receive("add_asset_folders", serde_json::to_value(folders)?)?;
        Ok(self.created_folders(folders))
    }

    async fn upload_binary_file(
        &self,
        data: &UploadBinaryFileData,
    ) -> ManagementResult<FileReference> {
        self.receive(
            "upload_binary_file",
            json!({ "file_name": data.file_name, "size": data.data.len() }),
        )?;
        self.uploads.lock().unwrap().push(data.clone());
        Ok(FileReference::internal(self.generate_id("file")))
    }

    async fn add_asset(&self, data: &AssetData) -> ManagementResult<AssetContract> {
        self.receive("add_asset", serde_json::to_value(data)?)?;
        Ok(AssetContract {
            id: self.generate_id("asset"),
            file_name: "uploaded".to_string(),
            title: data.title.clone(),
            size: 0,
            content_type: String::new(),
            file_reference: Some(data.file_reference.clone()),
            folder: data.folder.clone(),
            external_id: data.external_id.clone(),
            descriptions: data.descriptions.clone(),
            url: None,
            last_modified: None,
        })
    }

    async fn add_content_item(
        &self,
        data: &ContentItemData,
    ) -> ManagementResult<ContentItemContract> {
        self.receive("add_content_item", serde_json::to_value(data)?)?;
        Ok(ContentItemContract {
            id: self.generate_id("item"),
            name: data.name.clone(),
            codename: data.codename.clone(),
            content_type: data.content_type.clone(),
            external_id: data.external_id.clone(),
            last_modified: None,
        })
    }

    async fn upsert_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
        data: &LanguageVariantData,
    ) -> ManagementResult<LanguageVariantContract> {
        self.receive(
            "upsert_language_variant",
            json!({
                "item": item_codename,
                "language": language_codename,
                "elements": data.elements,
            }),
        )?;
        Ok(LanguageVariantContract {
            item: Reference::codename(item_codename),
            language: Reference::codename(language_codename),
            elements: data.elements.clone(),
            workflow_step: None,
            last_modified: None,
        })
    }

    async fn publish_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
    ) -> ManagementResult<()> {
        self.receive(
            "publish_language_variant",
            json!({ "item": item_codename, "language": language_codename }),
        )
    }

    async fn change_workflow_step(
        &self,
        item_codename: &str,
        language_codename: &str,
        workflow_step_id: &str,
    ) -> ManagementResult<()> {
        self.receive(
            "change_workflow_step",
            json!({
                "item": item_codename,
                "language": language_codename,
                "workflow_step": workflow_step_id,
            }),
        )
    }
}

/// Observer collecting every event
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<ImportEvent>>,
    pub unsupported: Mutex<Vec<String>>,
}

impl ImportObserver for RecordingObserver {
    fn on_import(&self, event: &ImportEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_unsupported_binary_file(&self, file: &BinaryFile) {
        self.unsupported.lock().unwrap().push(file.asset_id.clone());
    }
}
