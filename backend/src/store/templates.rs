use common::fields::derive_fields;
use common::model::field::Field;
use common::model::template::{Template, TemplateInput};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Store, StoreError};

const COLUMNS: &str = "id, name, name_ar, description, description_ar, category_id, sort_order, \
                       is_active, estimated_time, markdown_content, fields, created_at, updated_at";

fn from_row(row: &Row) -> rusqlite::Result<Template> {
    let fields_json: String = row.get(10)?;
    let fields: Vec<Field> = serde_json::from_str(&fields_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?;

    Ok(Template {
        id: row.get(0)?,
        name: row.get(1)?,
        name_ar: row.get(2)?,
        description: row.get(3)?,
        description_ar: row.get(4)?,
        category_id: row.get(5)?,
        order: row.get(6)?,
        is_active: row.get(7)?,
        estimated_time: row.get(8)?,
        markdown_content: row.get(9)?,
        fields,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

/// Field list stored for `input`: always re-derived from the body, with the
/// overrides sent in the same edit applied.
fn stored_fields(input: &TemplateInput) -> Vec<Field> {
    derive_fields(input.markdown_content.as_deref().unwrap_or_default(), &input.fields)
}

impl Store {
    pub fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.query_templates(
            &format!("SELECT {COLUMNS} FROM templates ORDER BY sort_order, name"),
            params![],
        )
    }

    pub fn list_active_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.query_templates(
            &format!("SELECT {COLUMNS} FROM templates WHERE is_active = 1 ORDER BY sort_order, name"),
            params![],
        )
    }

    pub fn list_active_templates_by_category(&self, category_id: &str) -> Result<Vec<Template>, StoreError> {
        self.query_templates(
            &format!(
                "SELECT {COLUMNS} FROM templates WHERE is_active = 1 AND category_id = ?1 \
                 ORDER BY sort_order, name"
            ),
            params![category_id],
        )
    }

    fn query_templates(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Template>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let templates = stmt
            .query_map(args, from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(templates)
    }

    pub fn get_template(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let conn = self.connect()?;
        let template = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM templates WHERE id = ?1"),
                params![id],
                from_row,
            )
            .optional()?;
        Ok(template)
    }

    pub fn create_template(&self, input: &TemplateInput) -> Result<Template, StoreError> {
        let timestamp = now();
        let template = Template {
            id: new_id(),
            name: input.name.clone(),
            name_ar: input.name_ar.clone(),
            description: input.description.clone(),
            description_ar: input.description_ar.clone(),
            category_id: input.category_id.clone(),
            order: input.order,
            is_active: input.is_active,
            estimated_time: input.estimated_time.clone(),
            markdown_content: input.markdown_content.clone(),
            fields: stored_fields(input),
            created_at: timestamp,
            updated_at: timestamp,
        };

        let conn = self.connect()?;
        conn.execute(
            &format!(
                "INSERT INTO templates ({COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
            ),
            params![
                template.id,
                template.name,
                template.name_ar,
                template.description,
                template.description_ar,
                template.category_id,
                template.order,
                template.is_active,
                template.estimated_time,
                template.markdown_content,
                serde_json::to_string(&template.fields)?,
                template.created_at,
                template.updated_at,
            ],
        )?;
        Ok(template)
    }

    /// Replace a template wholesale, recomputing its field list; `None` when
    /// no such template exists. Concurrent edits: the last write wins.
    pub fn update_template(&self, id: &str, input: &TemplateInput) -> Result<Option<Template>, StoreError> {
        let fields = serde_json::to_string(&stored_fields(input))?;
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE templates SET name = ?2, name_ar = ?3, description = ?4, description_ar = ?5, \
             category_id = ?6, sort_order = ?7, is_active = ?8, estimated_time = ?9, \
             markdown_content = ?10, fields = ?11, updated_at = ?12 WHERE id = ?1",
            params![
                id,
                input.name,
                input.name_ar,
                input.description,
                input.description_ar,
                input.category_id,
                input.order,
                input.is_active,
                input.estimated_time,
                input.markdown_content,
                fields,
                now(),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_template(id)
    }

    pub fn delete_template(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM templates WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::testing::{template_input as input, temp_store};
    use crate::store::Store;
    use common::model::field::{Field, FieldType};
    use common::model::template::Template;

    fn create(store: &Store, body: Option<&str>) -> Template {
        store.create_template(&input("cat-1", body)).unwrap()
    }

    #[test]
    fn fields_are_derived_on_create() {
        let (_dir, store) = temp_store();
        let template = create(&store, Some("Je soussigné /full_name, né le /birth_date. /full_name"));

        let ids: Vec<&str> = template.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["full_name", "birth_date"]);
        assert_eq!(store.get_template(&template.id).unwrap(), Some(template));
    }

    #[test]
    fn fields_are_recomputed_on_update() {
        let (_dir, store) = temp_store();
        let created = create(&store, Some("/old_token"));

        let mut edit = input("cat-1", Some("/email and /city"));
        let mut email = Field::text("email", "", "");
        email.field_type = FieldType::Email;
        edit.fields = vec![email, Field::text("old_token", "Old", "old")];

        let updated = store.update_template(&created.id, &edit).unwrap().unwrap();
        let ids: Vec<&str> = updated.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["email", "city"]);
        assert_eq!(updated.fields[0].field_type, FieldType::Email);
        assert_eq!(updated.fields[0].label, "Email");
    }

    #[test]
    fn metadata_only_template_has_no_fields() {
        let (_dir, store) = temp_store();
        let template = create(&store, None);
        assert!(template.fields.is_empty());
        assert!(!template.has_body());
    }

    #[test]
    fn active_listing_filters_by_flag_and_category() {
        let (_dir, store) = temp_store();
        let a = create(&store, Some("/a"));
        let mut hidden = input("cat-1", Some("/b"));
        hidden.is_active = false;
        store.create_template(&hidden).unwrap();
        let mut other = input("cat-2", Some("/c"));
        other.order = 0;
        let c = store.create_template(&other).unwrap();

        assert_eq!(store.list_templates().unwrap().len(), 3);
        let active: Vec<String> = store.list_active_templates().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(active, vec![c.id.clone(), a.id.clone()]);
        let in_cat: Vec<String> = store
            .list_active_templates_by_category("cat-1")
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(in_cat, vec![a.id]);
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let (_dir, store) = temp_store();
        let template = create(&store, Some("/x"));
        assert!(store.delete_template(&template.id).unwrap());
        assert!(!store.delete_template(&template.id).unwrap());
        assert!(store.update_template(&template.id, &input("cat-1", None)).unwrap().is_none());
    }

    #[test]
    fn deleting_a_category_keeps_its_templates() {
        let (_dir, store) = temp_store();
        let category = store.list_categories().unwrap().remove(0);
        let template = store.create_template(&input(&category.id, Some("/x"))).unwrap();
        store.delete_category(&category.id).unwrap();
        assert!(store.get_template(&template.id).unwrap().is_some());
    }
}
