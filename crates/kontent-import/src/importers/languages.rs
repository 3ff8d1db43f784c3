use kontent_import_types::{
    EntityKind, ImportError, ImportEventKind, ImportResult, LanguageContract, LanguageData,
    LanguagePatch, Reference,
};
use tracing::{info, warn};

use crate::run::ImportRun;

impl ImportRun<'_> {
    async fn target_languages(&self) -> ImportResult<Vec<LanguageContract>> {
        self.client
            .list_languages()
            .await
            .map_err(|e| self.fail("List languages", "target project", e))
    }

    /// Align the target default language with the source one
    ///
    /// Runs before any other stage. Without `fix_languages` a codename mismatch
    /// aborts the run; with it the target default language is renamed.
    pub(crate) async fn prepare_default_language(
        &mut self,
        languages: &[LanguageContract],
    ) -> ImportResult<()> {
        let Some(source_default) = languages.iter().find(|l| l.is_default_language()) else {
            return Ok(());
        };
        self.default_language_codename = Some(source_default.codename.clone());

        let target = self.target_languages().await?;
        let target_default = target
            .iter()
            .find(|l| l.is_default_language())
            .ok_or(ImportError::DefaultLanguageNotFound)?;

        if target_default.codename == source_default.codename {
            return Ok(());
        }

        if !self.config.fix_languages {
            return Err(ImportError::DefaultLanguageMismatch {
                source_codename: source_default.codename.clone(),
                target_codename: target_default.codename.clone(),
            });
        }

        warn!(
            "Renaming target default language '{}' to '{}'",
            target_default.codename, source_default.codename
        );
        self.client
            .modify_language(
                &Reference::default_language(),
                &[LanguagePatch::rename(&source_default.codename)],
            )
            .await
            .map_err(|e| self.fail("Rename default language", &source_default.name, e))?;

        Ok(())
    }

    pub(crate) async fn import_languages(
        &mut self,
        languages: &[LanguageContract],
    ) -> ImportResult<()> {
        // Read after any default language rename
        let mut target = self.target_languages().await?;

        for language in languages {
            if language.is_default_language() {
                self.reporter.skipped(
                    ImportEventKind::Language,
                    &language.name,
                    "default language always exists",
                );
                continue;
            }

            if let Some(existing) = target.iter().find(|t| t.codename == language.codename) {
                if !existing.is_active {
                    info!("Reactivating language '{}'", language.codename);
                    self.client
                        .modify_language(
                            &Reference::id(existing.id.clone()),
                            &[LanguagePatch::activate()],
                        )
                        .await
                        .map_err(|e| self.fail("Activate language", &language.name, e))?;
                    self.stats.reactivated_languages.push(language.codename.clone());
                }
                self.reporter
                    .skipped(ImportEventKind::Language, &language.name, "already exists");
                self.stats.skipped_languages.push(language.codename.clone());
                continue;
            }

            let data = LanguageData {
                name: language.name.clone(),
                codename: language.codename.clone(),
                external_id: language.external_id.clone(),
                is_active: language.is_active,
                fallback_language: fallback_reference(language)?,
            };
            let created = self
                .client
                .add_language(&data)
                .await
                .map_err(|e| self.fail("Create language", &language.name, e))?;

            self.record(
                EntityKind::Language,
                &language.id,
                &created.id,
                language,
                &created,
                &language.name,
            )?;
            target.push(created);
        }

        Ok(())
    }
}

/// Fallback of a normalized language: the default language sentinel or a codename
fn fallback_reference(language: &LanguageContract) -> ImportResult<Option<Reference>> {
    match &language.fallback_language {
        None => Ok(None),
        Some(reference) if reference.is_sentinel() => Ok(Some(Reference::default_language())),
        Some(Reference::Codename(codename)) => Ok(Some(Reference::codename(codename.clone()))),
        Some(_) => Err(ImportError::MissingCodename {
            kind: EntityKind::Language,
            context: format!("fallback language of '{}'", language.codename),
        }),
    }
}
