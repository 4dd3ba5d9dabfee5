use chrono::{DateTime, Datelike, TimeZone, Utc};
use common::model::profile::UserStats;
use rusqlite::params;

use super::{Store, StoreError};

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

impl Store {
    /// Dashboard counters for `user_id`; "this month" is the calendar month
    /// of `now`, in UTC.
    pub fn user_stats(&self, user_id: &str, now: DateTime<Utc>) -> Result<UserStats, StoreError> {
        let conn = self.connect()?;

        let saved_forms_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM saved_forms WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        let (generated_docs_count, total_downloads): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(download_count), 0) FROM generated_documents WHERE user_id = ?1",
            params![user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let this_month_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM generated_documents WHERE user_id = ?1 AND generated_at >= ?2",
            params![user_id, month_start(now)],
            |row| row.get(0),
        )?;

        Ok(UserStats {
            saved_forms_count,
            generated_docs_count,
            this_month_count,
            total_downloads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::month_start;
    use crate::store::testing::temp_store;
    use chrono::{Duration, TimeZone, Utc};
    use common::model::profile::UserStats;
    use common::requests::SaveFormRequest;

    #[test]
    fn month_start_truncates_to_first_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 17, 15, 4, 5).unwrap();
        assert_eq!(month_start(now), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn counts_forms_documents_and_downloads() {
        let (_dir, store) = temp_store();
        store
            .create_saved_form(
                "alice",
                &SaveFormRequest {
                    template_id: "tpl".to_string(),
                    title: "Brouillon".to_string(),
                    values: Default::default(),
                },
            )
            .unwrap();
        let doc = store.record_generated_document("alice", "tpl", "pdf", "A").unwrap();
        store.record_generated_document("alice", "tpl", "pdf", "B").unwrap();
        store.increment_download_count("alice", &doc.id).unwrap();

        let stats = store.user_stats("alice", Utc::now()).unwrap();
        assert_eq!(
            stats,
            UserStats {
                saved_forms_count: 1,
                generated_docs_count: 2,
                this_month_count: 2,
                total_downloads: 3,
            }
        );

        let next_month = Utc::now() + Duration::days(40);
        assert_eq!(store.user_stats("alice", next_month).unwrap().this_month_count, 0);
        assert_eq!(store.user_stats("bob", Utc::now()).unwrap(), UserStats::default());
    }
}
