use common::locale::{Locale, Theme};
use common::model::profile::{Identity, Preferences, UserProfile};
use common::requests::PreferencesUpdate;
use rusqlite::{params, OptionalExtension, Row};

use super::{now, Store, StoreError};

const COLUMNS: &str = "uid, email, display_name, photo_url, language, theme, created_at, updated_at";

fn from_row(row: &Row) -> rusqlite::Result<UserProfile> {
    let language: String = row.get(4)?;
    let theme: String = row.get(5)?;
    Ok(UserProfile {
        uid: row.get(0)?,
        email: row.get(1)?,
        display_name: row.get(2)?,
        photo_url: row.get(3)?,
        preferences: Preferences {
            language: Locale::from_tag(&language),
            theme: if theme == Theme::Dark.as_str() { Theme::Dark } else { Theme::Light },
        },
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Store {
    pub fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, StoreError> {
        let conn = self.connect()?;
        let profile = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM user_profiles WHERE uid = ?1"),
                params![uid],
                from_row,
            )
            .optional()?;
        Ok(profile)
    }

    /// Profile of `identity`, created with `language` as the initial
    /// preference on first sight. Contact details are refreshed from the
    /// identity each time; preferences are kept.
    pub fn get_or_create_profile(&self, identity: &Identity, language: Locale) -> Result<UserProfile, StoreError> {
        let timestamp = now();
        let conn = self.connect()?;
        conn.execute(
            &format!(
                "INSERT INTO user_profiles ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) \
                 ON CONFLICT(uid) DO UPDATE SET email = excluded.email, \
                 display_name = excluded.display_name, photo_url = excluded.photo_url"
            ),
            params![
                identity.uid,
                identity.email,
                identity.display_name,
                identity.photo_url,
                language.code(),
                Theme::default().as_str(),
                timestamp,
            ],
        )?;
        let profile = conn.query_row(
            &format!("SELECT {COLUMNS} FROM user_profiles WHERE uid = ?1"),
            params![identity.uid],
            from_row,
        )?;
        Ok(profile)
    }

    /// Apply the provided preference changes; `None` when the profile does
    /// not exist yet.
    pub fn update_preferences(
        &self,
        uid: &str,
        update: &PreferencesUpdate,
    ) -> Result<Option<UserProfile>, StoreError> {
        let Some(current) = self.get_profile(uid)? else {
            return Ok(None);
        };
        let language = update.language.unwrap_or(current.preferences.language);
        let theme = update.theme.unwrap_or(current.preferences.theme);

        let conn = self.connect()?;
        conn.execute(
            "UPDATE user_profiles SET language = ?2, theme = ?3, updated_at = ?4 WHERE uid = ?1",
            params![uid, language.code(), theme.as_str(), now()],
        )?;
        self.get_profile(uid)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::testing::temp_store;
    use common::locale::{Locale, Theme};
    use common::model::profile::Identity;
    use common::requests::PreferencesUpdate;

    fn identity(name: &str) -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            email: Some("user@example.com".to_string()),
            display_name: Some(name.to_string()),
            photo_url: None,
        }
    }

    #[test]
    fn profile_is_created_once_and_keeps_preferences() {
        let (_dir, store) = temp_store();
        let created = store.get_or_create_profile(&identity("Samir"), Locale::Ar).unwrap();
        assert_eq!(created.preferences.language, Locale::Ar);
        assert_eq!(created.preferences.theme, Theme::Light);

        let update = PreferencesUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        store.update_preferences("uid-1", &update).unwrap().unwrap();

        let again = store.get_or_create_profile(&identity("Samir B."), Locale::Fr).unwrap();
        assert_eq!(again.display_name.as_deref(), Some("Samir B."));
        assert_eq!(again.preferences.language, Locale::Ar);
        assert_eq!(again.preferences.theme, Theme::Dark);
        assert_eq!(again.created_at, created.created_at);
    }

    #[test]
    fn preferences_of_unknown_user_are_not_created() {
        let (_dir, store) = temp_store();
        let update = PreferencesUpdate {
            language: Some(Locale::Ar),
            ..Default::default()
        };
        assert!(store.update_preferences("nobody", &update).unwrap().is_none());
        assert!(store.get_profile("nobody").unwrap().is_none());
    }
}
