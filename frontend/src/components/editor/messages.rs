use common::model::category::Category;
use common::model::field::Field;
use common::model::template::Template;

use crate::context::AppContext;

use super::helpers::Style;
use super::state::{MetaField, Tab};

pub enum Msg {
    ContextChanged(AppContext),
    Loaded {
        template: Option<Template>,
        categories: Vec<Category>,
    },
    LoadFailed(String),
    SetTab(Tab),
    UpdateText(String),
    Undo,
    Redo,
    ApplyStyle(Style),
    AutoResize,
    SetMeta(MetaField, String),
    SetActive(bool),
    EditField(Field),
    Save,
    Saved(Template),
    SaveFailed(String),
    OpenPdf,
    PdfReady(String),
    PdfFailed(String),
    PdfLoaded,
    ClosePdf,
}
