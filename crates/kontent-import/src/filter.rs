//! Inclusion filtering
//!
//! Applied before any reference rewriting, producing new collections; the
//! caller's import source is never modified.

use kontent_import_types::{AssetFolderContract, ImportData, Predicate, ProcessFilters};

fn keep<T: Clone>(items: &[T], predicate: &Option<Predicate<T>>) -> Vec<T> {
    match predicate {
        Some(predicate) => items.iter().filter(|&item| predicate(item)).cloned().collect(),
        None => items.to_vec(),
    }
}

/// Filter a folder tree node by node; a rejected folder takes its subtree with it
fn keep_folders(
    folders: &[AssetFolderContract],
    predicate: &Predicate<AssetFolderContract>,
) -> Vec<AssetFolderContract> {
    folders
        .iter()
        .filter(|&folder| predicate(folder))
        .map(|folder| AssetFolderContract {
            folders: keep_folders(&folder.folders, predicate),
            ..folder.clone()
        })
        .collect()
}

/// Collections kept by the configured predicates
pub fn apply_filters(filters: &ProcessFilters, data: &ImportData) -> ImportData {
    ImportData {
        languages: keep(&data.languages, &filters.language),
        taxonomies: keep(&data.taxonomies, &filters.taxonomy),
        content_type_snippets: keep(&data.content_type_snippets, &filters.content_type_snippet),
        content_types: keep(&data.content_types, &filters.content_type),
        asset_folders: match &filters.asset_folder {
            Some(predicate) => keep_folders(&data.asset_folders, predicate),
            None => data.asset_folders.clone(),
        },
        assets: keep(&data.assets, &filters.asset),
        content_items: keep(&data.content_items, &filters.content_item),
        language_variants: keep(&data.language_variants, &filters.language_variant),
        workflow_steps: data.workflow_steps.clone(),
    }
}
