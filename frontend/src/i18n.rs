//! Locale-aware formatting shared by the pages.

use chrono::{DateTime, Utc};
use common::locale::Locale;
use num_format::{Locale as NumberLocale, ToFormattedString};

use crate::api::ApiError;

/// Thousands-grouped count, e.g. `12 345` in French.
pub fn format_count(value: i64, locale: Locale) -> String {
    let grouping = match locale {
        Locale::Fr => &NumberLocale::fr,
        Locale::Ar => &NumberLocale::ar,
    };
    value.to_formatted_string(grouping)
}

/// `dd/mm/yyyy`, as printed in generated documents.
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Toast text for a failed API call. `action` is the `(fr, ar)` name of
/// what was attempted.
pub fn failure(locale: Locale, action: (&str, &str), error: &ApiError) -> String {
    let (fr, ar) = action;
    match locale {
        Locale::Fr => format!("Échec : {fr} ({error})"),
        Locale::Ar => format!("فشل: {ar} ({error})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_names_the_action_in_the_reader_language() {
        let error = ApiError::Status {
            status: 404,
            message: "template not found".to_string(),
        };
        let action = ("modèle", "النموذج");
        assert_eq!(
            failure(Locale::Fr, action, &error),
            "Échec : modèle (template not found (404))"
        );
        let arabic = failure(Locale::Ar, action, &error);
        assert!(arabic.starts_with("فشل: النموذج"));
        assert!(!arabic.contains("modèle"));
    }
}
