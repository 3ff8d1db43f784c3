use std::collections::HashMap;

use kontent_import_types::{
    AssetFolderContract, AssetFolderData, EntityKind, ImportError, ImportResult,
};

use crate::run::ImportRun;

/// Pre-order, depth-first walk of a folder tree
pub fn flatten_folders(folders: &[AssetFolderContract]) -> Vec<&AssetFolderContract> {
    let mut flat = Vec::new();
    for folder in folders {
        flat.push(folder);
        flat.extend(flatten_folders(&folder.folders));
    }
    flat
}

/// Creation request for a tree; every node's external id is its source id
fn folder_request(folder: &AssetFolderContract) -> AssetFolderData {
    AssetFolderData {
        name: folder.name.clone(),
        external_id: folder.id.clone(),
        folders: folder.folders.iter().map(folder_request).collect(),
    }
}

/// Single node, without its children, as stored in the ledger
fn folder_node(folder: &AssetFolderContract) -> AssetFolderContract {
    AssetFolderContract {
        folders: Vec::new(),
        ..folder.clone()
    }
}

impl ImportRun<'_> {
    /// The whole tree is created by one request, then matched back by external id
    pub(crate) async fn import_asset_folders(
        &mut self,
        folders: &[AssetFolderContract],
    ) -> ImportResult<()> {
        let request: Vec<AssetFolderData> = folders.iter().map(folder_request).collect();
        let created = self
            .client
            .add_asset_folders(&request)
            .await
            .map_err(|e| self.fail("Create asset folders", "folder tree", e))?;

        let originals: HashMap<&str, &AssetFolderContract> = flatten_folders(folders)
            .into_iter()
            .map(|folder| (folder.id.as_str(), folder))
            .collect();

        for folder in flatten_folders(&created) {
            let external_id = folder
                .external_id
                .as_deref()
                .ok_or_else(|| ImportError::AssetFolderMismatch {
                    external_id: folder.id.clone(),
                    reason: "created folder has no external id".to_string(),
                })?;
            let original = originals
                .get(external_id)
                .ok_or_else(|| ImportError::AssetFolderMismatch {
                    external_id: external_id.to_string(),
                    reason: "no folder with this id in the import source".to_string(),
                })?;

            self.record(
                EntityKind::AssetFolder,
                &original.id,
                &folder.id,
                &folder_node(original),
                &folder_node(folder),
                &original.name,
            )?;
        }

        for original in flatten_folders(folders) {
            let recorded = self.ledger.lookup(EntityKind::AssetFolder, &original.id);
            if recorded.is_none() {
                return Err(ImportError::AssetFolderMismatch {
                    external_id: original.id.clone(),
                    reason: "folder missing from the created tree".to_string(),
                });
            }
        }

        Ok(())
    }
}
