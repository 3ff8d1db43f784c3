use bytes::Bytes;
use kontent_import_types::{
    AssetContract, AssetData, AssetDescription, Contract, EntityKind, ImportError, ImportResult,
    ImportSource, Reference, UploadBinaryFileData,
};

use crate::{ledger::ImportLedger, run::ImportRun};

/// Target folder of an asset; the sentinel id means the asset has no folder
fn target_folder(
    asset: &AssetContract,
    ledger: &ImportLedger,
) -> ImportResult<Option<Reference>> {
    match &asset.folder {
        None => Ok(None),
        Some(reference) if reference.is_sentinel() => Ok(None),
        Some(Reference::Id(id)) => ledger
            .lookup(EntityKind::AssetFolder, id)
            .map(|imported_id| Some(Reference::id(imported_id)))
            .ok_or_else(|| ImportError::UnresolvedReference {
                id: id.clone(),
                expected: format!("imported {} for asset '{}'", EntityKind::AssetFolder, asset.id),
            }),
        Some(other) => Ok(Some(other.clone())),
    }
}

/// Descriptions must name their language symbolically
fn target_descriptions(asset: &AssetContract) -> ImportResult<Vec<AssetDescription>> {
    asset
        .descriptions
        .iter()
        .map(|description| match &description.language {
            Reference::Id(_) if !description.language.is_sentinel() => {
                Err(ImportError::MissingCodename {
                    kind: EntityKind::Language,
                    context: format!("description of asset '{}'", asset.id),
                })
            }
            _ => Ok(description.clone()),
        })
        .collect()
}

impl ImportRun<'_> {
    /// Binary payloads are looked up in `source`; `assets` are the normalized contracts
    pub(crate) async fn import_assets(
        &mut self,
        assets: &[AssetContract],
        source: &ImportSource,
    ) -> ImportResult<()> {
        for asset in assets {
            let file = source
                .binary_file(&asset.id)
                .ok_or_else(|| ImportError::MissingBinaryFile {
                    asset_id: asset.id.clone(),
                })?;
            let folder = target_folder(asset, &self.ledger)?;
            let descriptions = target_descriptions(asset)?;
            let title = asset.title();

            let limit = self.config.max_asset_size_bytes;
            let payload = if file.size_bytes >= limit {
                self.reporter.unsupported_binary_file(asset, file, limit);
                self.stats.unsupported_binary_files.push(asset.id.clone());
                Bytes::new()
            } else {
                file.data.clone()
            };

            let file_reference = self
                .client
                .upload_binary_file(&UploadBinaryFileData {
                    file_name: asset.file_name.clone(),
                    content_type: asset.content_type.clone(),
                    data: payload,
                })
                .await
                .map_err(|e| self.fail("Upload binary file", &asset.file_name, e))?;

            let data = AssetData {
                file_reference,
                title: asset.title.clone(),
                external_id: asset.external_id.clone(),
                folder,
                descriptions,
            };
            let created = self
                .client
                .add_asset(&data)
                .await
                .map_err(|e| self.fail("Create asset", &title, e))?;

            self.record(EntityKind::Asset, &asset.id, &created.id, asset, &created, &title)?;
        }

        Ok(())
    }
}
