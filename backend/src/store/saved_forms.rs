use common::model::saved_form::SavedForm;
use common::model::FieldValues;
use common::requests::SaveFormRequest;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Store, StoreError};

const COLUMNS: &str = "id, user_id, template_id, title, field_values, created_at, updated_at";

fn from_row(row: &Row) -> rusqlite::Result<SavedForm> {
    let values_json: String = row.get(4)?;
    let values: FieldValues = serde_json::from_str(&values_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(SavedForm {
        id: row.get(0)?,
        user_id: row.get(1)?,
        template_id: row.get(2)?,
        title: row.get(3)?,
        values,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

// Every query is scoped to the owner, so one identity never sees or edits
// another's forms.
impl Store {
    /// Most recently updated first.
    pub fn list_saved_forms(&self, user_id: &str) -> Result<Vec<SavedForm>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM saved_forms WHERE user_id = ?1 ORDER BY updated_at DESC"
        ))?;
        let forms = stmt
            .query_map(params![user_id], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(forms)
    }

    pub fn get_saved_form(&self, user_id: &str, id: &str) -> Result<Option<SavedForm>, StoreError> {
        let conn = self.connect()?;
        let form = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM saved_forms WHERE id = ?1 AND user_id = ?2"),
                params![id, user_id],
                from_row,
            )
            .optional()?;
        Ok(form)
    }

    pub fn create_saved_form(&self, user_id: &str, request: &SaveFormRequest) -> Result<SavedForm, StoreError> {
        let timestamp = now();
        let form = SavedForm {
            id: new_id(),
            user_id: user_id.to_string(),
            template_id: request.template_id.clone(),
            title: request.title.clone(),
            values: request.values.clone(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        let conn = self.connect()?;
        conn.execute(
            &format!("INSERT INTO saved_forms ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            params![
                form.id,
                form.user_id,
                form.template_id,
                form.title,
                serde_json::to_string(&form.values)?,
                form.created_at,
                form.updated_at,
            ],
        )?;
        Ok(form)
    }

    pub fn update_saved_form(
        &self,
        user_id: &str,
        id: &str,
        request: &SaveFormRequest,
    ) -> Result<Option<SavedForm>, StoreError> {
        let values = serde_json::to_string(&request.values)?;
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE saved_forms SET template_id = ?3, title = ?4, field_values = ?5, updated_at = ?6 \
             WHERE id = ?1 AND user_id = ?2",
            params![id, user_id, request.template_id, request.title, values, now()],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_saved_form(user_id, id)
    }

    pub fn delete_saved_form(&self, user_id: &str, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let deleted = conn.execute(
            "DELETE FROM saved_forms WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::testing::temp_store;
    use common::model::FieldValues;
    use common::requests::SaveFormRequest;

    fn request(title: &str) -> SaveFormRequest {
        let mut values = FieldValues::new();
        values.insert("full_name".to_string(), "Nadia Haddad".to_string());
        SaveFormRequest {
            template_id: "tpl-1".to_string(),
            title: title.to_string(),
            values,
        }
    }

    #[test]
    fn forms_are_scoped_to_their_owner() {
        let (_dir, store) = temp_store();
        let form = store.create_saved_form("alice", &request("Brouillon")).unwrap();

        assert_eq!(store.get_saved_form("alice", &form.id).unwrap(), Some(form.clone()));
        assert_eq!(store.get_saved_form("bob", &form.id).unwrap(), None);
        assert!(store.list_saved_forms("bob").unwrap().is_empty());
        assert!(!store.delete_saved_form("bob", &form.id).unwrap());
        assert!(store.update_saved_form("bob", &form.id, &request("x")).unwrap().is_none());
    }

    #[test]
    fn update_replaces_title_and_values() {
        let (_dir, store) = temp_store();
        let form = store.create_saved_form("alice", &request("v1")).unwrap();
        let mut next = request("v2");
        next.values.insert("city".to_string(), "Oran".to_string());

        let updated = store.update_saved_form("alice", &form.id, &next).unwrap().unwrap();
        assert_eq!(updated.title, "v2");
        assert_eq!(updated.values.get("city").map(String::as_str), Some("Oran"));
        assert_eq!(store.list_saved_forms("alice").unwrap(), vec![updated]);

        assert!(store.delete_saved_form("alice", &form.id).unwrap());
        assert!(store.list_saved_forms("alice").unwrap().is_empty());
    }
}
