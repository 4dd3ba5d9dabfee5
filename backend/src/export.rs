//! # Document Exporter
//!
//! Turns a template and a submission into a PDF:
//!
//! 1.  **Template lookup** in the store.
//! 2.  **Rendering** of the Markdown body with the submitted values
//!     (`common::render::render_document`). A missing body fails here, before
//!     any PDF work starts.
//! 3.  **Framing**: the rendered content is wrapped in a bilingual page frame
//!     (direction, title, national header, generated-on footer).
//! 4.  **PDF conversion** through the configured [`PdfRenderer`].
//! 5.  **History**: when the caller is identified, a generation record is
//!     appended. A failure there is logged and the export still succeeds.

use std::sync::Arc;

use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use common::form::{validate, ValidationErrors};
use common::locale::Locale;
use common::model::document::GeneratedDocument;
use common::model::profile::Identity;
use common::model::template::Template;
use common::render::{escape_html, render_document, RenderError};
use common::requests::ExportRequest;
use log::{info, warn};
use thiserror::Error;

use crate::pdf::{PdfError, PdfOptions, PdfRenderer};
use crate::store::{Store, StoreError};

pub const DOCUMENT_KIND: &str = "pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template {0} not found")]
    TemplateNotFound(String),

    #[error("template {0} has no markdown body")]
    MissingBody(String),

    #[error("{} field(s) failed validation", .0.len())]
    InvalidValues(ValidationErrors),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExportError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            ExportError::MissingBody(_) | ExportError::InvalidValues(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ExportError::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExportError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A finished export.
#[derive(Debug)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// History entry, when one was written.
    pub record: Option<GeneratedDocument>,
}

#[derive(Clone)]
pub struct Exporter {
    renderer: Arc<dyn PdfRenderer>,
    options: PdfOptions,
}

impl Exporter {
    pub fn new(renderer: Arc<dyn PdfRenderer>, options: PdfOptions) -> Self {
        Self { renderer, options }
    }

    /// Framed HTML of the filled document, as it will be laid out in the PDF.
    pub fn render_html(
        &self,
        template: &Template,
        request: &ExportRequest,
        locale: Locale,
        now: DateTime<Utc>,
    ) -> Result<String, ExportError> {
        validate(&template.fields, &request.values).map_err(ExportError::InvalidValues)?;
        let content = render_document(template.markdown_content.as_deref(), &request.values)
            .map_err(|RenderError::MissingBody| ExportError::MissingBody(template.id.clone()))?;
        let title = template.name_in(locale);
        Ok(document_frame(title, &content, locale, now))
    }

    /// Runs the whole pipeline for `template_id`. Blocking: call it from
    /// `web::block`.
    pub fn export(
        &self,
        store: &Store,
        template_id: &str,
        request: &ExportRequest,
        locale: Locale,
        identity: Option<&Identity>,
    ) -> Result<ExportedPdf, ExportError> {
        let template = store
            .get_template(template_id)?
            .ok_or_else(|| ExportError::TemplateNotFound(template_id.to_string()))?;
        let now = Utc::now();

        let html = self.render_html(&template, request, locale, now)?;
        let bytes = self.renderer.render(&html, &self.options)?;
        info!("Exported template {} ({} bytes)", template.id, bytes.len());

        let record = identity.and_then(|identity| {
            let title = request
                .title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| template.name_in(locale));
            match store.record_generated_document(&identity.uid, &template.id, DOCUMENT_KIND, title) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Could not record generated document for {}: {}", identity.uid, e);
                    None
                }
            }
        });

        Ok(ExportedPdf {
            filename: export_filename(&template.id, now),
            bytes,
            record,
        })
    }
}

/// `<template-id>-<unix millis>.pdf`
pub fn export_filename(template_id: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.pdf", template_id, now.timestamp_millis())
}

/// Wraps rendered content in the printable page frame. Block elements stay
/// one per line so the PDF layout can read them back.
pub fn document_frame(title: &str, content: &str, locale: Locale, now: DateTime<Utc>) -> String {
    let dir = locale.dir();
    let align = if locale.is_rtl() { "right" } else { "left" };
    let nation = locale.pick(
        "République Algérienne Démocratique et Populaire",
        "الجمهورية الجزائرية الديمقراطية الشعبية",
    );
    let generated = locale.pick("Document généré électroniquement", "تم إنشاء هذه الوثيقة إلكترونياً");
    let date_label = locale.pick("Date : ", "التاريخ: ");
    let date = now.format("%d/%m/%Y");

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\" dir=\"{dir}\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body style=\"font-family:Arial,sans-serif;font-size:12px;direction:{dir};text-align:{align};line-height:1.6;\">\n\
         <div class=\"document-header\" style=\"text-align:center;margin-bottom:40px;\">\n\
         <p style=\"color:#666;font-size:14px;\">{nation}</p>\n\
         <hr style=\"border:none;border-top:2px solid #2563eb;width:200px;margin:20px auto;\">\n\
         </div>\n\
         <div class=\"document-content\">\n\
         {content}\n\
         </div>\n\
         <div class=\"document-footer\" style=\"margin-top:60px;text-align:center;\">\n\
         <p style=\"color:#666;font-size:12px;\">{generated}</p>\n\
         <p style=\"color:#666;font-size:12px;\">{date_label}{date}</p>\n\
         </div>\n\
         </body>\n\
         </html>\n",
        lang = locale.code(),
        title = escape_html(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::temp_store;
    use chrono::TimeZone;
    use common::model::field::Field;
    use common::model::template::TemplateInput;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records what it was asked to render.
    #[derive(Default)]
    struct FakeRenderer {
        calls: AtomicUsize,
        last_markup: Mutex<String>,
    }

    impl PdfRenderer for FakeRenderer {
        fn render(&self, markup: &str, _options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_markup.lock().unwrap() = markup.to_string();
            Ok(b"%PDF-fake".to_vec())
        }
    }

    fn exporter() -> (Arc<FakeRenderer>, Exporter) {
        let renderer = Arc::new(FakeRenderer::default());
        let exporter = Exporter::new(renderer.clone(), PdfOptions::default());
        (renderer, exporter)
    }

    fn template_input(body: Option<&str>) -> TemplateInput {
        TemplateInput {
            name: "Attestation".to_string(),
            name_ar: "شهادة".to_string(),
            description: String::new(),
            description_ar: String::new(),
            category_id: "cat".to_string(),
            order: 1,
            is_active: true,
            estimated_time: String::new(),
            markdown_content: body.map(str::to_string),
            fields: Vec::new(),
        }
    }

    fn request(pairs: &[(&str, &str)]) -> ExportRequest {
        ExportRequest {
            values: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            ..Default::default()
        }
    }

    fn identity() -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            email: None,
            display_name: None,
            photo_url: None,
        }
    }

    #[test]
    fn empty_body_fails_before_pdf_conversion() {
        let (_dir, store) = temp_store();
        let (renderer, exporter) = exporter();
        let template = store.create_template(&template_input(Some("   "))).unwrap();

        let err = exporter
            .export(&store, &template.id, &request(&[]), Locale::Fr, Some(&identity()))
            .unwrap_err();

        assert!(matches!(err, ExportError::MissingBody(ref id) if *id == template.id));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert!(store.list_generated_documents("uid-1").unwrap().is_empty());
    }

    #[test]
    fn export_fills_values_and_records_history() {
        let (_dir, store) = temp_store();
        let (renderer, exporter) = exporter();
        let template = store
            .create_template(&template_input(Some("**Date:** /date\n\nNom: /name")))
            .unwrap();

        let exported = exporter
            .export(&store, &template.id, &request(&[("date", "2024-01-01")]), Locale::Fr, Some(&identity()))
            .unwrap();

        assert_eq!(exported.bytes, b"%PDF-fake");
        assert!(exported.filename.starts_with(&format!("{}-", template.id)));
        assert!(exported.filename.ends_with(".pdf"));
        let markup = renderer.last_markup.lock().unwrap().clone();
        assert!(markup.contains("<strong>Date:</strong> 2024-01-01"));
        assert!(markup.contains("Nom: ____________________"));
        assert!(!markup.contains("/date"));

        let record = exported.record.unwrap();
        assert_eq!(record.title, "Attestation");
        assert_eq!(store.list_generated_documents("uid-1").unwrap(), vec![record]);
    }

    #[test]
    fn anonymous_export_skips_history() {
        let (_dir, store) = temp_store();
        let (_renderer, exporter) = exporter();
        let template = store.create_template(&template_input(Some("/x"))).unwrap();

        let exported = exporter
            .export(&store, &template.id, &request(&[]), Locale::Fr, None)
            .unwrap();
        assert!(exported.record.is_none());
    }

    #[test]
    fn history_failure_does_not_fail_the_export() {
        let (_dir, store) = temp_store();
        let (_renderer, exporter) = exporter();
        let template = store.create_template(&template_input(Some("/x"))).unwrap();
        store
            .connect()
            .unwrap()
            .execute("DROP TABLE generated_documents", [])
            .unwrap();

        let exported = exporter
            .export(&store, &template.id, &request(&[]), Locale::Fr, Some(&identity()))
            .unwrap();
        assert!(exported.record.is_none());
        assert!(!exported.bytes.is_empty());
    }

    #[test]
    fn unknown_template_is_not_found() {
        let (_dir, store) = temp_store();
        let (_renderer, exporter) = exporter();
        let err = exporter
            .export(&store, "missing", &request(&[]), Locale::Fr, None)
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let (_dir, store) = temp_store();
        let (renderer, exporter) = exporter();
        let mut input = template_input(Some("/name"));
        let mut name = Field::text("name", "", "");
        name.required = true;
        input.fields = vec![name];
        let template = store.create_template(&input).unwrap();

        let err = exporter
            .export(&store, &template.id, &request(&[]), Locale::Fr, None)
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidValues(ref e) if e.get("name").is_some()));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn frame_follows_locale() {
        let now = Utc.with_ymd_and_hms(2024, 5, 9, 10, 0, 0).unwrap();
        let ar = document_frame("شهادة", "<p>x</p>", Locale::Ar, now);
        assert!(ar.contains("dir=\"rtl\""));
        assert!(ar.contains("تم إنشاء هذه الوثيقة إلكترونياً"));
        assert!(ar.contains("09/05/2024"));

        let fr = document_frame("A & B", "<p>x</p>", Locale::Fr, now);
        assert!(fr.contains("dir=\"ltr\""));
        assert!(fr.contains("<title>A &amp; B</title>"));
        assert!(fr.contains("Document généré électroniquement"));
        assert!(fr.contains("\n<p>x</p>\n"));
    }

    #[test]
    fn filename_uses_template_id_and_millis() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(export_filename("tpl-9", now), "tpl-9-1704067200000.pdf");
    }
}
