use kontent_import_types::{EntityKind, ImportResult, TaxonomyContract, TaxonomyData};

use crate::run::ImportRun;

impl ImportRun<'_> {
    pub(crate) async fn import_taxonomies(
        &mut self,
        taxonomies: &[TaxonomyContract],
    ) -> ImportResult<()> {
        for taxonomy in taxonomies {
            let data = TaxonomyData {
                name: taxonomy.name.clone(),
                codename: taxonomy.codename.clone(),
                external_id: taxonomy.external_id.clone(),
                terms: self.schema_payload(
                    &taxonomy.terms,
                    &format!("taxonomy '{}'", taxonomy.codename),
                )?,
            };
            let created = self
                .client
                .add_taxonomy(&data)
                .await
                .map_err(|e| self.fail("Create taxonomy", &taxonomy.name, e))?;

            self.record(
                EntityKind::Taxonomy,
                &taxonomy.id,
                &created.id,
                taxonomy,
                &created,
                &taxonomy.name,
            )?;
        }

        Ok(())
    }
}
