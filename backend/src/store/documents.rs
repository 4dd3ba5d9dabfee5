use common::model::document::GeneratedDocument;
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Store, StoreError};

const COLUMNS: &str = "id, user_id, template_id, kind, title, generated_at, download_count";

fn from_row(row: &Row) -> rusqlite::Result<GeneratedDocument> {
    Ok(GeneratedDocument {
        id: row.get(0)?,
        user_id: row.get(1)?,
        template_id: row.get(2)?,
        kind: row.get(3)?,
        title: row.get(4)?,
        generated_at: row.get(5)?,
        download_count: row.get(6)?,
    })
}

impl Store {
    /// Append a history entry. The export itself counts as the first download.
    pub fn record_generated_document(
        &self,
        user_id: &str,
        template_id: &str,
        kind: &str,
        title: &str,
    ) -> Result<GeneratedDocument, StoreError> {
        let document = GeneratedDocument {
            id: new_id(),
            user_id: user_id.to_string(),
            template_id: template_id.to_string(),
            kind: kind.to_string(),
            title: title.to_string(),
            generated_at: now(),
            download_count: 1,
        };

        let conn = self.connect()?;
        conn.execute(
            &format!("INSERT INTO generated_documents ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            params![
                document.id,
                document.user_id,
                document.template_id,
                document.kind,
                document.title,
                document.generated_at,
                document.download_count,
            ],
        )?;
        Ok(document)
    }

    /// Newest first.
    pub fn list_generated_documents(&self, user_id: &str) -> Result<Vec<GeneratedDocument>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM generated_documents WHERE user_id = ?1 ORDER BY generated_at DESC"
        ))?;
        let documents = stmt
            .query_map(params![user_id], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(documents)
    }

    pub fn increment_download_count(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<GeneratedDocument>, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "UPDATE generated_documents SET download_count = download_count + 1 \
             WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        let document = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM generated_documents WHERE id = ?1 AND user_id = ?2"),
                params![id, user_id],
                from_row,
            )
            .optional()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::testing::temp_store;

    #[test]
    fn history_is_per_user_and_newest_first() {
        let (_dir, store) = temp_store();
        let first = store.record_generated_document("alice", "tpl-1", "pdf", "Attestation").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = store.record_generated_document("alice", "tpl-2", "pdf", "Certificat").unwrap();
        store.record_generated_document("bob", "tpl-1", "pdf", "Autre").unwrap();

        let history = store.list_generated_documents("alice").unwrap();
        assert_eq!(history, vec![second, first]);
    }

    #[test]
    fn download_counter_increments_for_owner_only() {
        let (_dir, store) = temp_store();
        let doc = store.record_generated_document("alice", "tpl-1", "pdf", "Attestation").unwrap();
        assert_eq!(doc.download_count, 1);

        let bumped = store.increment_download_count("alice", &doc.id).unwrap().unwrap();
        assert_eq!(bumped.download_count, 2);
        assert!(store.increment_download_count("bob", &doc.id).unwrap().is_none());
        assert!(store.increment_download_count("alice", "missing").unwrap().is_none());
    }
}
