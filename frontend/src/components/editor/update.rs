//! Update logic of the template editor.
//!
//! Text edits go through the undo history and refresh the global `app_dirty`
//! flag read by the navigation guard. Saving posts a snapshot whose field
//! list is re-derived from the body, and the PDF sheet renders the saved
//! template with sample values.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::HtmlTextAreaElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::form::CHECKED;
use common::model::field::{Field, FieldType};
use common::model::FieldValues;
use common::requests::ExportRequest;

use crate::helpers::{pdf_object_url, revoke_url, show_toast};
use crate::i18n::failure;
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{apply_style, byte_to_utf16_idx, utf16_to_byte_idx};
use super::messages::Msg;
use super::state::{MetaField, Tab, TemplateEditor};

pub fn update(editor: &mut TemplateEditor, ctx: &Context<TemplateEditor>, msg: Msg) -> bool {
    match msg {
        Msg::ContextChanged(app) => {
            editor.app = app;
            true
        }
        Msg::Loaded { template, categories } => {
            editor.categories = categories;
            editor.load(template);
            editor.loading = false;
            set_window_dirty_flag(editor);
            ctx.link().send_message(Msg::AutoResize);
            true
        }
        Msg::LoadFailed(message) => {
            editor.loading = false;
            show_toast(&message);
            editor.load(None);
            true
        }
        Msg::UpdateText(text) => {
            editor.record(text);
            set_window_dirty_flag(editor);
            true
        }
        Msg::Undo => {
            if editor.history_index > 0 {
                editor.history_index -= 1;
                editor.text = editor.history[editor.history_index].clone();
                set_window_dirty_flag(editor);
            }
            true
        }
        Msg::Redo => {
            if editor.history_index + 1 < editor.history.len() {
                editor.history_index += 1;
                editor.text = editor.history[editor.history_index].clone();
                set_window_dirty_flag(editor);
            }
            true
        }
        Msg::SetTab(tab) => {
            editor.active_tab = tab;
            if tab == Tab::Editor {
                // the textarea only exists after the next render
                let link = ctx.link().clone();
                spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(50).await;
                    link.send_message(Msg::AutoResize);
                });
            }
            true
        }
        Msg::ApplyStyle(style) => {
            let Some(textarea) = editor.textarea_ref.cast::<HtmlTextAreaElement>() else {
                return false;
            };
            let start_utf16 = textarea.selection_start().ok().flatten().unwrap_or(0) as usize;
            let end_utf16 = textarea.selection_end().ok().flatten().unwrap_or(0) as usize;
            let start = utf16_to_byte_idx(&editor.text, start_utf16);
            let end = utf16_to_byte_idx(&editor.text, end_utf16);

            let (text, select_from, select_to) = apply_style(&editor.text, start, end, style);
            textarea.set_value(&text);
            textarea
                .set_selection_range(
                    byte_to_utf16_idx(&text, select_from),
                    byte_to_utf16_idx(&text, select_to),
                )
                .ok();
            textarea.focus().ok();
            editor.record(text);
            set_window_dirty_flag(editor);
            ctx.link().send_message(Msg::AutoResize);
            true
        }
        Msg::AutoResize => {
            editor.resize_textarea();
            false
        }
        Msg::SetMeta(field, value) => {
            let input = &mut editor.input;
            match field {
                MetaField::Name => input.name = value,
                MetaField::NameAr => input.name_ar = value,
                MetaField::Description => input.description = value,
                MetaField::DescriptionAr => input.description_ar = value,
                MetaField::Category => input.category_id = value,
                MetaField::Order => input.order = value.trim().parse().unwrap_or(input.order),
                MetaField::EstimatedTime => input.estimated_time = value,
            }
            set_window_dirty_flag(editor);
            true
        }
        Msg::SetActive(active) => {
            editor.input.is_active = active;
            set_window_dirty_flag(editor);
            true
        }
        Msg::EditField(field) => {
            match editor.input.fields.iter_mut().find(|f| f.id == field.id) {
                Some(existing) => *existing = field,
                None => editor.input.fields.push(field),
            }
            set_window_dirty_flag(editor);
            true
        }
        Msg::Save => {
            let input = editor.snapshot();
            if input.name.trim().is_empty() || input.name_ar.trim().is_empty() {
                show_toast(editor.app.tr(
                    "Le nom est requis dans les deux langues.",
                    "الاسم مطلوب باللغتين.",
                ));
                return false;
            }
            if input.category_id.is_empty() {
                show_toast(editor.app.tr("Choisissez une catégorie.", "اختر فئة."));
                return false;
            }
            editor.saving = true;
            let api = editor.app.api();
            let template_id = editor.template_id.clone();
            let locale = editor.app.locale;
            let link = ctx.link().clone();
            spawn_local(async move {
                match api.save_template(template_id.as_deref(), &input).await {
                    Ok(template) => link.send_message(Msg::Saved(template)),
                    Err(e) => link.send_message(Msg::SaveFailed(failure(locale, ("enregistrement du modèle", "حفظ النموذج"), &e))),
                }
            });
            true
        }
        Msg::Saved(template) => {
            editor.saving = false;
            editor.template_id = Some(template.id.clone());
            // the server's field list drops overrides for removed tokens
            editor.input.fields = template.fields;
            editor.original_md5 = Some(editor.fingerprint());
            set_window_dirty_flag(editor);
            show_toast(editor.app.tr("Modèle enregistré.", "تم حفظ النموذج."));
            true
        }
        Msg::SaveFailed(message) => {
            editor.saving = false;
            show_toast(&message);
            true
        }
        Msg::OpenPdf => {
            let Some(template_id) = editor.template_id.clone() else {
                show_toast(editor.app.tr(
                    "Enregistrez le modèle avant de générer le PDF.",
                    "احفظ النموذج قبل إنشاء ملف PDF.",
                ));
                return false;
            };
            if editor.is_dirty() {
                show_toast(editor.app.tr(
                    "Enregistrez le modèle avant de générer le PDF.",
                    "احفظ النموذج قبل إنشاء ملف PDF.",
                ));
                return false;
            }
            editor.pdf_loading = true;
            open_top_sheet(&editor.pdf_sheet_ref);

            let request = ExportRequest {
                values: sample_values(&editor.derived_fields()),
                locale: Some(editor.app.locale),
                title: None,
            };
            let api = editor.app.api();
            let locale = editor.app.locale;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.export(&template_id, &request).await;
                match result {
                    Ok(pdf) => match pdf_object_url(&pdf.bytes) {
                        Ok(url) => link.send_message(Msg::PdfReady(url)),
                        Err(_) => link.send_message(Msg::PdfFailed("PDF".to_string())),
                    },
                    Err(e) => link.send_message(Msg::PdfFailed(failure(locale, ("export PDF", "تصدير PDF"), &e))),
                }
            });
            true
        }
        Msg::PdfReady(url) => {
            if let Some(previous) = editor.pdf_url.replace(url) {
                revoke_url(&previous);
            }
            true
        }
        Msg::PdfFailed(message) => {
            editor.pdf_loading = false;
            close_top_sheet(&editor.pdf_sheet_ref);
            show_toast(&message);
            true
        }
        Msg::PdfLoaded => {
            editor.pdf_loading = false;
            true
        }
        Msg::ClosePdf => {
            close_top_sheet(&editor.pdf_sheet_ref);
            if let Some(url) = editor.pdf_url.take() {
                revoke_url(&url);
            }
            editor.pdf_loading = false;
            true
        }
    }
}

/// Values that pass validation for the common field kinds: the first option
/// of choice fields, a checked box, the label elsewhere.
fn sample_values(fields: &[Field]) -> FieldValues {
    fields
        .iter()
        .map(|field| {
            let value = match field.field_type {
                FieldType::Select | FieldType::Radio => {
                    field.options.first().map(|o| o.value.clone()).unwrap_or_default()
                }
                FieldType::Checkbox => CHECKED.to_string(),
                _ => field.label.clone(),
            };
            (field.id.clone(), value)
        })
        .collect()
}

/// Publishes the unsaved-changes state on `window.app_dirty`.
fn set_window_dirty_flag(editor: &TemplateEditor) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(editor.is_dirty()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::field::FieldOption;

    #[test]
    fn sample_values_pick_valid_choices() {
        let mut gender = Field::text("gender", "Gender", "gender");
        gender.field_type = FieldType::Radio;
        gender.options = vec![FieldOption {
            value: "f".into(),
            label: "Femme".into(),
            label_ar: "امرأة".into(),
        }];
        let mut consent = Field::text("consent", "Consent", "consent");
        consent.field_type = FieldType::Checkbox;
        let name = Field::text("full_name", "Full Name", "full name");

        let values = sample_values(&[gender, consent, name]);
        assert_eq!(values["gender"], "f");
        assert_eq!(values["consent"], CHECKED);
        assert_eq!(values["full_name"], "Full Name");
    }
}
