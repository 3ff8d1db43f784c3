use kontent_import_types::{ImportEventKind, ImportResult, WorkflowStepContract};
use serde_json::json;

use crate::run::{ImportRun, UpsertedVariant};

fn variant_event(variant: &UpsertedVariant) -> serde_json::Value {
    json!({
        "item": { "codename": variant.item_codename },
        "language": { "codename": variant.language_codename },
    })
}

impl ImportRun<'_> {
    /// Publish the variants that were published in the source project
    pub(crate) async fn publish_language_variants(
        &mut self,
        workflow_steps: &[WorkflowStepContract],
    ) -> ImportResult<()> {
        for index in 0..self.variants.len() {
            let variant = self.variants[index].clone();
            let published_in_source = variant
                .source_workflow_step
                .as_deref()
                .and_then(|step_id| workflow_steps.iter().find(|step| step.id == step_id))
                .is_some_and(WorkflowStepContract::is_published);
            if !published_in_source {
                continue;
            }

            self.client
                .publish_language_variant(&variant.item_codename, &variant.language_codename)
                .await
                .map_err(|e| self.fail("Publish language variant", &variant.title, e))?;

            self.variants[index].published = true;
            self.stats.published += 1;
            self.reporter
                .imported(ImportEventKind::Publish, &variant.title, &variant_event(&variant));
        }

        Ok(())
    }

    /// Move every imported, unpublished variant to the given workflow step
    pub(crate) async fn change_workflow_steps(
        &mut self,
        workflow_step_id: &str,
    ) -> ImportResult<()> {
        let pending: Vec<UpsertedVariant> = self
            .variants
            .iter()
            .filter(|variant| !variant.published)
            .cloned()
            .collect();

        for variant in pending {
            self.client
                .change_workflow_step(
                    &variant.item_codename,
                    &variant.language_codename,
                    workflow_step_id,
                )
                .await
                .map_err(|e| self.fail("Change workflow step", &variant.title, e))?;

            self.stats.workflow_changes += 1;
            self.reporter.imported(
                ImportEventKind::ChangeWorkflowStep,
                &variant.title,
                &variant_event(&variant),
            );
        }

        Ok(())
    }
}
