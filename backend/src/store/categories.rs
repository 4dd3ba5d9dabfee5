use common::model::category::{default_categories, Category, CategoryInput};
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Store, StoreError};

const COLUMNS: &str = "id, name, name_ar, description, description_ar, sort_order, is_active, created_at, updated_at";

fn from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        name_ar: row.get(2)?,
        description: row.get(3)?,
        description_ar: row.get(4)?,
        order: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl Store {
    /// All categories, lowest `order` first.
    pub fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.query_categories(&format!("SELECT {COLUMNS} FROM categories ORDER BY sort_order, name"))
    }

    pub fn list_active_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.query_categories(&format!(
            "SELECT {COLUMNS} FROM categories WHERE is_active = 1 ORDER BY sort_order, name"
        ))
    }

    fn query_categories(&self, sql: &str) -> Result<Vec<Category>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let categories = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn get_category(&self, id: &str) -> Result<Option<Category>, StoreError> {
        let conn = self.connect()?;
        let category = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM categories WHERE id = ?1"),
                params![id],
                from_row,
            )
            .optional()?;
        Ok(category)
    }

    pub fn create_category(&self, input: &CategoryInput) -> Result<Category, StoreError> {
        let timestamp = now();
        let category = Category {
            id: new_id(),
            name: input.name.clone(),
            name_ar: input.name_ar.clone(),
            description: input.description.clone(),
            description_ar: input.description_ar.clone(),
            order: input.order,
            is_active: input.is_active,
            created_at: timestamp,
            updated_at: timestamp,
        };

        let conn = self.connect()?;
        conn.execute(
            &format!("INSERT INTO categories ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
            params![
                category.id,
                category.name,
                category.name_ar,
                category.description,
                category.description_ar,
                category.order,
                category.is_active,
                category.created_at,
                category.updated_at,
            ],
        )?;
        Ok(category)
    }

    /// Replace the editable fields; `None` when no such category exists.
    pub fn update_category(&self, id: &str, input: &CategoryInput) -> Result<Option<Category>, StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE categories SET name = ?2, name_ar = ?3, description = ?4, description_ar = ?5, \
             sort_order = ?6, is_active = ?7, updated_at = ?8 WHERE id = ?1",
            params![
                id,
                input.name,
                input.name_ar,
                input.description,
                input.description_ar,
                input.order,
                input.is_active,
                now(),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_category(id)
    }

    /// Templates of a deleted category are left untouched.
    pub fn delete_category(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Insert [`default_categories`] when the table is empty; returns how many
    /// were inserted.
    pub fn seed_default_categories(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .connect()?
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }

        let defaults = default_categories();
        for input in &defaults {
            self.create_category(input)?;
        }
        Ok(defaults.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::store::testing::{empty_store, temp_store};
    use common::model::category::CategoryInput;

    #[test]
    fn fresh_store_is_seeded_in_order() {
        let (_dir, store) = temp_store();
        let categories = store.list_categories().unwrap();
        assert_eq!(categories.len(), 9);
        assert_eq!(categories[0].name, "Travail / Emploi");
        assert_eq!(categories[8].name_ar, "أخرى");
        assert!(categories.windows(2).all(|w| w[0].order <= w[1].order));
        assert_eq!(store.seed_default_categories().unwrap(), 0);
    }

    #[test]
    fn crud_round_trip() {
        let (_dir, store) = empty_store();
        let mut input = CategoryInput::new("Banque", "البنك", "", "", 3);
        let created = store.create_category(&input).unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(store.get_category(&created.id).unwrap(), Some(created.clone()));

        input.name = "Banque / Crédit".to_string();
        input.is_active = false;
        let updated = store.update_category(&created.id, &input).unwrap().unwrap();
        assert_eq!(updated.name, "Banque / Crédit");
        assert!(!updated.is_active);
        assert_eq!(updated.created_at, created.created_at);
        assert!(store.list_active_categories().unwrap().is_empty());

        assert!(store.delete_category(&created.id).unwrap());
        assert!(!store.delete_category(&created.id).unwrap());
        assert_eq!(store.get_category(&created.id).unwrap(), None);
    }

    #[test]
    fn updating_missing_category_returns_none() {
        let (_dir, store) = empty_store();
        let input = CategoryInput::new("X", "X", "", "", 1);
        assert_eq!(store.update_category("missing", &input).unwrap(), None);
    }

    #[test]
    fn list_orders_by_rank() {
        let (_dir, store) = empty_store();
        store.create_category(&CategoryInput::new("B", "ب", "", "", 2)).unwrap();
        store.create_category(&CategoryInput::new("A", "أ", "", "", 1)).unwrap();
        let names: Vec<String> = store.list_categories().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
