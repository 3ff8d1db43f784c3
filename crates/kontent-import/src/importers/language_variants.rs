use kontent_import_types::{
    EntityKind, ImportError, ImportResult, LanguageVariantContract, LanguageVariantData, Reference,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    run::{ImportRun, UpsertedVariant},
    translator::resolve_to_target_ids,
};

/// Kinds a variant element may point at
const ELEMENT_REFERENCE_KINDS: [EntityKind; 2] = [EntityKind::ContentItem, EntityKind::Asset];

impl ImportRun<'_> {
    /// Codename of the default language, from the source or else the target
    async fn default_language_codename(&mut self) -> ImportResult<String> {
        if let Some(codename) = &self.default_language_codename {
            return Ok(codename.clone());
        }

        let languages = self
            .client
            .list_languages()
            .await
            .map_err(|e| self.fail("List languages", "target project", e))?;
        let codename = languages
            .into_iter()
            .find(|language| language.is_default_language())
            .map(|language| language.codename)
            .ok_or(ImportError::DefaultLanguageNotFound)?;
        debug!("Using target default language '{}'", codename);

        self.default_language_codename = Some(codename.clone());
        Ok(codename)
    }

    fn item_codename(&self, variant: &LanguageVariantContract) -> ImportResult<String> {
        match &variant.item {
            Reference::Codename(codename) => Ok(codename.clone()),
            Reference::Id(id) => {
                let entry = self
                    .ledger
                    .entry(EntityKind::ContentItem, id)
                    .ok_or_else(|| ImportError::UnresolvedReference {
                        id: id.clone(),
                        expected: format!("imported {}", EntityKind::ContentItem),
                    })?;
                entry
                    .imported
                    .get("codename")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| ImportError::MissingCodename {
                        kind: EntityKind::ContentItem,
                        context: format!("imported content item '{}'", entry.imported_id),
                    })
            }
            Reference::ExternalId(external_id) => Err(ImportError::MissingCodename {
                kind: EntityKind::ContentItem,
                context: format!("variant of item with external id '{}'", external_id),
            }),
        }
    }

    async fn language_codename(
        &mut self,
        variant: &LanguageVariantContract,
    ) -> ImportResult<String> {
        match &variant.language {
            reference if reference.is_sentinel() => self.default_language_codename().await,
            Reference::Codename(codename) => Ok(codename.clone()),
            Reference::Id(id) => self
                .symbols
                .codename(id)
                .map(str::to_string)
                .ok_or_else(|| ImportError::MissingCodename {
                    kind: EntityKind::Language,
                    context: format!("variant of item '{}'", variant.item),
                }),
            Reference::ExternalId(_) => Err(ImportError::MissingCodename {
                kind: EntityKind::Language,
                context: format!("variant of item '{}'", variant.item),
            }),
        }
    }

    /// Upsert every variant, keyed by item and language codename
    pub(crate) async fn import_language_variants(
        &mut self,
        variants: &[LanguageVariantContract],
    ) -> ImportResult<()> {
        for variant in variants {
            let item_codename = self.item_codename(variant)?;
            let language_codename = self.language_codename(variant).await?;
            let title = format!("{} ({})", item_codename, language_codename);

            let mut elements = Value::Array(variant.elements.clone());
            resolve_to_target_ids(&mut elements, &self.ledger, &ELEMENT_REFERENCE_KINDS)?;
            let data = LanguageVariantData {
                elements: match elements {
                    Value::Array(elements) => elements,
                    _ => Vec::new(),
                },
            };

            let upserted = self
                .client
                .upsert_language_variant(&item_codename, &language_codename, &data)
                .await
                .map_err(|e| self.fail("Upsert language variant", &title, e))?;

            self.record(
                EntityKind::LanguageVariant,
                &variant.composite_id(),
                &upserted.composite_id(),
                variant,
                &upserted,
                &title,
            )?;
            self.variants.push(UpsertedVariant {
                title,
                item_codename,
                language_codename,
                source_workflow_step: variant
                    .workflow_step
                    .as_ref()
                    .and_then(Reference::as_id)
                    .map(str::to_string),
                published: false,
            });
        }

        Ok(())
    }
}
