//! Template editor for administrators: Markdown body with undo/redo and a
//! formatting toolbar, live preview of the blank form, per-field overrides
//! and template metadata.
//!
//! Split like the other large components: `state` holds the data, `update`
//! the message handling, `view` the markup, `helpers` the pure text logic.

use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::context::subscribe;
use crate::i18n::failure;

pub use messages::Msg;
pub use props::TemplateEditorProps;
pub use state::TemplateEditor;

impl Component for TemplateEditor {
    type Message = Msg;
    type Properties = TemplateEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        let editor = TemplateEditor::new(app, handle, ctx.props().template_id.clone());
        load(&editor, ctx);
        editor
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(url) = self.pdf_url.take() {
            crate::helpers::revoke_url(&url);
        }
    }
}

/// Fetches the categories and, when editing, the template itself. Admin
/// listings include inactive templates, which the public lookup hides.
fn load(editor: &TemplateEditor, ctx: &Context<TemplateEditor>) {
    let api = editor.app.api();
    let locale = editor.app.locale;
    let template_id = editor.template_id.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let categories = match api.admin_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                link.send_message(Msg::LoadFailed(failure(locale, ("catégories", "الفئات"), &e)));
                return;
            }
        };
        let template = match template_id {
            Some(id) => match api.admin_templates().await {
                Ok(templates) => templates.into_iter().find(|t| t.id == id),
                Err(e) => {
                    link.send_message(Msg::LoadFailed(failure(locale, ("modèle", "النموذج"), &e)));
                    return;
                }
            },
            None => None,
        };
        link.send_message(Msg::Loaded { template, categories });
    });
}
