use kontent_import_types::{
    ContentItemContract, ContentItemData, EntityKind, ImportError, ImportResult, Reference,
};

use crate::run::ImportRun;

impl ImportRun<'_> {
    pub(crate) async fn import_content_items(
        &mut self,
        items: &[ContentItemContract],
    ) -> ImportResult<()> {
        for item in items {
            let Reference::Codename(type_codename) = &item.content_type else {
                return Err(ImportError::MissingCodename {
                    kind: EntityKind::ContentType,
                    context: format!("content item '{}'", item.codename),
                });
            };

            let data = ContentItemData {
                name: item.name.clone(),
                codename: item.codename.clone(),
                external_id: item.external_id.clone(),
                content_type: Reference::codename(type_codename.clone()),
            };
            let created = self
                .client
                .add_content_item(&data)
                .await
                .map_err(|e| self.fail("Create content item", &item.name, e))?;

            self.record(
                EntityKind::ContentItem,
                &item.id,
                &created.id,
                item,
                &created,
                &item.name,
            )?;
        }

        Ok(())
    }
}
