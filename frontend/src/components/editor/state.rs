//! Editor state: the Markdown body with its undo history, the template
//! metadata being edited, per-field overrides and the PDF sheet.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlTextAreaElement};
use yew::prelude::*;

use common::fields::derive_fields;
use common::model::category::Category;
use common::model::field::Field;
use common::model::template::{Template, TemplateInput};

use crate::context::AppContext;

use super::helpers::compute_md5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Editor,
    Preview,
    Fields,
}

/// Text metadata inputs of the details card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Name,
    NameAr,
    Description,
    DescriptionAr,
    Category,
    Order,
    EstimatedTime,
}

pub struct TemplateEditor {
    pub app: AppContext,
    pub _context_handle: Option<ContextHandle<AppContext>>,

    /// Markdown body as typed.
    pub text: String,
    /// Full snapshots of `text`; `history_index` points at the current one.
    pub history: Vec<String>,
    pub history_index: usize,
    pub active_tab: Tab,
    pub textarea_ref: NodeRef,
    pub pdf_sheet_ref: NodeRef,

    /// `None` until the template exists on the server.
    pub template_id: Option<String>,
    /// Metadata and field overrides. `markdown_content` is only synced from
    /// `text` when a snapshot is taken.
    pub input: TemplateInput,
    pub categories: Vec<Category>,

    pub loading: bool,
    pub saving: bool,
    pub pdf_url: Option<String>,
    pub pdf_loading: bool,

    /// Fingerprint of the last loaded or saved snapshot.
    pub original_md5: Option<String>,
}

impl TemplateEditor {
    pub fn new(app: AppContext, handle: Option<ContextHandle<AppContext>>, template_id: Option<String>) -> Self {
        Self {
            app,
            _context_handle: handle,
            text: String::new(),
            history: vec![String::new()],
            history_index: 0,
            active_tab: Tab::Editor,
            textarea_ref: NodeRef::default(),
            pdf_sheet_ref: NodeRef::default(),
            template_id,
            input: empty_input(),
            categories: Vec::new(),
            loading: true,
            saving: false,
            pdf_url: None,
            pdf_loading: false,
            original_md5: None,
        }
    }

    /// Replaces the editor content with `template`, or resets it for a new one.
    pub fn load(&mut self, template: Option<Template>) {
        match template {
            Some(template) => {
                self.template_id = Some(template.id.clone());
                self.text = template.markdown_content.clone().unwrap_or_default();
                self.input = TemplateInput::from(&template);
            }
            None => {
                self.template_id = None;
                self.text = String::new();
                self.input = empty_input();
                if let Some(first) = self.categories.first() {
                    self.input.category_id = first.id.clone();
                }
            }
        }
        self.history = vec![self.text.clone()];
        self.history_index = 0;
        self.original_md5 = Some(self.fingerprint());
    }

    /// Field list the server will store for the current body.
    pub fn derived_fields(&self) -> Vec<Field> {
        derive_fields(&self.text, &self.input.fields)
    }

    /// Payload sent on save.
    pub fn snapshot(&self) -> TemplateInput {
        let mut input = self.input.clone();
        input.markdown_content = Some(self.text.clone()).filter(|body| !body.trim().is_empty());
        input.fields = self.derived_fields();
        input
    }

    pub fn fingerprint(&self) -> String {
        compute_md5(&serde_json::to_string(&self.snapshot()).unwrap_or_default())
    }

    pub fn is_dirty(&self) -> bool {
        self.original_md5
            .as_ref()
            .map_or(!self.text.is_empty(), |original| original != &self.fingerprint())
    }

    /// Pushes `text` onto the undo history, dropping any redo tail.
    pub fn record(&mut self, text: String) {
        if self.text == text {
            return;
        }
        self.text = text.clone();
        self.history.truncate(self.history_index + 1);
        self.history.push(text);
        self.history_index = self.history.len() - 1;
    }

    /// Grows the textarea to its content height.
    pub fn resize_textarea(&self) {
        if let Some(textarea) = self.textarea_ref.cast::<HtmlTextAreaElement>() {
            if let Ok(element) = textarea.clone().dyn_into::<HtmlElement>() {
                let style = element.style();
                let _ = style.set_property("height", "auto");
                let _ = style.set_property("height", &format!("{}px", textarea.scroll_height()));
            }
        }
    }
}

fn empty_input() -> TemplateInput {
    TemplateInput {
        name: String::new(),
        name_ar: String::new(),
        description: String::new(),
        description_ar: String::new(),
        category_id: String::new(),
        order: 1,
        is_active: true,
        estimated_time: String::new(),
        markdown_content: None,
        fields: Vec::new(),
    }
}
