use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TemplateEditorProps {
    /// Template to edit. `None` starts a new template, created on first save.
    #[prop_or_default]
    pub template_id: Option<String>,
}
