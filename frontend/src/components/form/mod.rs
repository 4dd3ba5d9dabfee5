//! Dynamic form: renders the controls of a template's field list, validates
//! them locally and offers two independent actions.
//!
//! - **Save** keeps the current values as a named draft. It needs an identity
//!   and does not validate.
//! - **Export** validates first; any failure is shown next to its field and no
//!   request is sent. On success the PDF is downloaded and kept so it can be
//!   downloaded again without regenerating it.

mod controls;

use js_sys::Date;
use wasm_bindgen::JsValue;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::form::{collect_values, initial_values, validate, ValidationErrors};
use common::model::saved_form::SavedForm;
use common::model::template::Template;
use common::model::FieldValues;
use common::render::render_final;
use common::requests::{ExportRequest, SaveFormRequest};

use crate::api::{ApiError, ExportedPdf};
use crate::app::Page;
use crate::context::{subscribe, AppContext};
use crate::helpers::{download, pdf_object_url, revoke_url, show_toast};
use crate::i18n::failure;
use crate::markdown;

use controls::field_control;

#[derive(Properties, PartialEq, Clone)]
pub struct DynamicFormProps {
    pub template_id: String,
    /// Saved form being resumed, if any.
    #[prop_or_default]
    pub saved: Option<SavedForm>,
}

pub enum Msg {
    ContextChanged(AppContext),
    Loaded(Template),
    LoadFailed(ApiError),
    SetValue((String, String)),
    SetTitle(String),
    TogglePreview,
    Save,
    Saved(SavedForm),
    Export,
    Exported(ExportedPdf),
    DownloadAgain,
    Failed(String),
}

/// Last exported PDF, kept as an object URL.
struct LastExport {
    url: String,
    filename: String,
    document_id: Option<String>,
}

pub struct DynamicForm {
    app: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
    template: Option<Template>,
    values: FieldValues,
    errors: ValidationErrors,
    saved_id: Option<String>,
    title: String,
    preview: bool,
    busy: bool,
    last_export: Option<LastExport>,
}

impl Component for DynamicForm {
    type Message = Msg;
    type Properties = DynamicFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        let saved = ctx.props().saved.as_ref();

        let api = app.api();
        let template_id = ctx.props().template_id.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.template(&template_id).await {
                Ok(template) => link.send_message(Msg::Loaded(template)),
                Err(e) => link.send_message(Msg::LoadFailed(e)),
            }
        });

        Self {
            app,
            _context_handle: handle,
            template: None,
            values: FieldValues::new(),
            errors: ValidationErrors::default(),
            saved_id: saved.map(|s| s.id.clone()),
            title: saved.map(|s| s.title.clone()).unwrap_or_default(),
            preview: false,
            busy: false,
            last_export: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(app) => {
                self.app = app;
                true
            }
            Msg::Loaded(template) => {
                let prefilled = ctx.props().saved.as_ref().map(|s| &s.values);
                self.values = initial_values(&template.fields, prefilled);
                if self.title.is_empty() {
                    self.title = default_title(&template, &self.app);
                }
                self.template = Some(template);
                true
            }
            Msg::LoadFailed(e) => {
                show_toast(&failure(self.app.locale, ("modèle", "النموذج"), &e));
                self.app.navigate(Page::Catalog);
                false
            }
            Msg::SetValue((id, value)) => {
                self.values.insert(id, value);
                // errors are refreshed as the user corrects them
                if !self.errors.is_empty() {
                    if let Some(template) = &self.template {
                        self.errors = validate(&template.fields, &self.values).err().unwrap_or_default();
                    }
                }
                true
            }
            Msg::SetTitle(title) => {
                self.title = title;
                true
            }
            Msg::TogglePreview => {
                self.preview = !self.preview;
                true
            }
            Msg::Save => {
                let Some(template) = &self.template else {
                    return false;
                };
                if self.app.identity.is_none() {
                    show_toast(self.app.tr(
                        "Connectez-vous pour enregistrer ce formulaire.",
                        "سجّل الدخول لحفظ هذا النموذج.",
                    ));
                    return false;
                }
                let request = SaveFormRequest {
                    template_id: template.id.clone(),
                    title: if self.title.trim().is_empty() {
                        default_title(template, &self.app)
                    } else {
                        self.title.clone()
                    },
                    values: collect_values(&template.fields, &self.values),
                };
                self.busy = true;
                let api = self.app.api();
                let saved_id = self.saved_id.clone();
                let locale = self.app.locale;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.save_form(saved_id.as_deref(), &request).await {
                        Ok(form) => link.send_message(Msg::Saved(form)),
                        Err(e) => link.send_message(Msg::Failed(failure(locale, ("enregistrement", "الحفظ"), &e))),
                    }
                });
                true
            }
            Msg::Saved(form) => {
                self.busy = false;
                self.saved_id = Some(form.id);
                self.title = form.title;
                show_toast(self.app.tr("Formulaire enregistré.", "تم حفظ النموذج."));
                true
            }
            Msg::Export => {
                let Some(template) = &self.template else {
                    return false;
                };
                if let Err(errors) = validate(&template.fields, &self.values) {
                    self.errors = errors;
                    show_toast(self.app.tr(
                        "Veuillez corriger les champs signalés.",
                        "يرجى تصحيح الحقول المشار إليها.",
                    ));
                    return true;
                }
                self.errors = ValidationErrors::default();
                self.busy = true;

                let request = ExportRequest {
                    values: collect_values(&template.fields, &self.values),
                    locale: Some(self.app.locale),
                    title: Some(self.title.clone()).filter(|t| !t.trim().is_empty()),
                };
                let api = self.app.api();
                let template_id = template.id.clone();
                let locale = self.app.locale;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.export(&template_id, &request).await {
                        Ok(pdf) => link.send_message(Msg::Exported(pdf)),
                        Err(e) => link.send_message(Msg::Failed(failure(locale, ("export PDF", "تصدير PDF"), &e))),
                    }
                });
                true
            }
            Msg::Exported(pdf) => {
                self.busy = false;
                match pdf_object_url(&pdf.bytes) {
                    Ok(url) => {
                        download(&url, &pdf.filename).ok();
                        if let Some(previous) = self.last_export.replace(LastExport {
                            url,
                            filename: pdf.filename,
                            document_id: pdf.document_id,
                        }) {
                            revoke_url(&previous.url);
                        }
                        show_toast(self.app.tr("PDF généré.", "تم إنشاء ملف PDF."));
                    }
                    Err(_) => show_toast(self.app.tr("Impossible d'ouvrir le PDF.", "تعذر فتح ملف PDF.")),
                }
                true
            }
            Msg::DownloadAgain => {
                let Some(last) = &self.last_export else {
                    return false;
                };
                download(&last.url, &last.filename).ok();
                if let Some(document_id) = last.document_id.clone() {
                    let api = self.app.api();
                    spawn_local(async move {
                        if let Err(e) = api.count_download(&document_id).await {
                            gloo_console::log!(format!("Could not count download: {e}"));
                        }
                    });
                }
                false
            }
            Msg::Failed(message) => {
                self.busy = false;
                show_toast(&message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();
        let Some(template) = &self.template else {
            return html! { <p class="muted">{ app.tr("Chargement...", "جار التحميل...") }</p> };
        };
        let on_change = link.callback(Msg::SetValue);

        html! {
            <>
                <div class="card">
                    <h2>{ template.name_in(app.locale) }</h2>
                    <p class="muted">{ template.description_in(app.locale) }</p>
                    { for template.fields.iter().map(|field| {
                        let value = self.values.get(&field.id).map(String::as_str).unwrap_or_default();
                        let error = self.errors.message(&field.id, app.locale);
                        field_control(field, value, error, app.locale, &on_change)
                    }) }
                    {
                        if app.identity.is_some() {
                            html! {
                                <div class="form-field">
                                    <label>{ app.tr("Titre de l'enregistrement", "عنوان الحفظ") }</label>
                                    <input
                                        value={self.title.clone()}
                                        oninput={link.callback(|e: InputEvent| {
                                            Msg::SetTitle(e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
                                        })}
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <div class="actions">
                        <button class="btn secondary" onclick={link.callback(|_| Msg::TogglePreview)}>
                            { if self.preview { app.tr("Masquer l'aperçu", "إخفاء المعاينة") } else { app.tr("Aperçu", "معاينة") } }
                        </button>
                        {
                            if app.identity.is_some() {
                                html! {
                                    <button class="btn secondary" disabled={self.busy} onclick={link.callback(|_| Msg::Save)}>
                                        { app.tr("Enregistrer", "حفظ") }
                                    </button>
                                }
                            } else {
                                html! {}
                            }
                        }
                        <button class="btn" disabled={self.busy} onclick={link.callback(|_| Msg::Export)}>
                            { if self.busy { app.tr("Patientez...", "يرجى الانتظار...") } else { app.tr("Générer le PDF", "إنشاء PDF") } }
                        </button>
                        {
                            if self.last_export.is_some() {
                                html! {
                                    <button class="btn secondary" onclick={link.callback(|_| Msg::DownloadAgain)}>
                                        { app.tr("Télécharger à nouveau", "تنزيل مرة أخرى") }
                                    </button>
                                }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                </div>
                { if self.preview { self.preview_view(template) } else { html! {} } }
            </>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(last) = self.last_export.take() {
            revoke_url(&last.url);
        }
    }
}

impl DynamicForm {
    fn preview_view(&self, template: &Template) -> Html {
        let body = template.markdown_content.as_deref().unwrap_or_default();
        let html = render_final(body, &self.values, markdown::to_html);
        html! {
            <div class="card">
                <div class="document-preview" dir={self.app.locale.dir()}>
                    { Html::from_html_unchecked(AttrValue::from(html)) }
                </div>
            </div>
        }
    }
}

/// `<template name> - <today>`, in the UI language.
fn default_title(template: &Template, app: &AppContext) -> String {
    let tag = match app.locale {
        common::locale::Locale::Fr => "fr-FR",
        common::locale::Locale::Ar => "ar-DZ",
    };
    let today = Date::new_0().to_locale_date_string(tag, &JsValue::UNDEFINED);
    format!("{} - {}", template.name_in(app.locale), String::from(today))
}
