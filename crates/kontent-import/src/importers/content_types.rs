use kontent_import_types::{
    ContentTypeContract, ContentTypeData, ContentTypeSnippetContract, ContentTypeSnippetData,
    EntityKind, ImportResult,
};

use crate::run::ImportRun;

impl ImportRun<'_> {
    pub(crate) async fn import_content_type_snippets(
        &mut self,
        snippets: &[ContentTypeSnippetContract],
    ) -> ImportResult<()> {
        for snippet in snippets {
            let data = ContentTypeSnippetData {
                name: snippet.name.clone(),
                codename: snippet.codename.clone(),
                external_id: snippet.external_id.clone(),
                elements: self.schema_payload(
                    &snippet.elements,
                    &format!("content type snippet '{}'", snippet.codename),
                )?,
            };
            let created = self
                .client
                .add_content_type_snippet(&data)
                .await
                .map_err(|e| self.fail("Create content type snippet", &snippet.name, e))?;

            self.record(
                EntityKind::ContentTypeSnippet,
                &snippet.id,
                &created.id,
                snippet,
                &created,
                &snippet.name,
            )?;
        }

        Ok(())
    }

    /// Types may include snippets, so snippets must already exist
    pub(crate) async fn import_content_types(
        &mut self,
        types: &[ContentTypeContract],
    ) -> ImportResult<()> {
        for content_type in types {
            let context = format!("content type '{}'", content_type.codename);
            let data = ContentTypeData {
                name: content_type.name.clone(),
                codename: content_type.codename.clone(),
                external_id: content_type.external_id.clone(),
                elements: self.schema_payload(&content_type.elements, &context)?,
                content_groups: self.schema_payload(&content_type.content_groups, &context)?,
            };
            let created = self
                .client
                .add_content_type(&data)
                .await
                .map_err(|e| self.fail("Create content type", &content_type.name, e))?;

            self.record(
                EntityKind::ContentType,
                &content_type.id,
                &created.id,
                content_type,
                &created,
                &content_type.name,
            )?;
        }

        Ok(())
    }
}
