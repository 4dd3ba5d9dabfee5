use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::category::Category;
use common::model::template::Template;

use crate::app::Page;
use crate::context::{subscribe, AppContext, ContextAction};
use crate::helpers::show_toast;
use crate::i18n::failure;

use super::categories::CategoryPanel;

pub enum Msg {
    ContextChanged(AppContext),
    Loaded(Vec<Template>, Vec<Category>),
    Edit(Option<String>),
    Delete(String),
    Deleted,
    Failed(String),
    SignOut,
}

pub struct AdminDashboard {
    app: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
    templates: Vec<Template>,
    categories: Vec<Category>,
    loading: bool,
}

impl Component for AdminDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        let dashboard = Self {
            app,
            _context_handle: handle,
            templates: Vec::new(),
            categories: Vec::new(),
            loading: true,
        };
        dashboard.reload(ctx);
        dashboard
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(app) => {
                self.app = app;
                true
            }
            Msg::Loaded(templates, categories) => {
                self.templates = templates;
                self.categories = categories;
                self.loading = false;
                true
            }
            Msg::Edit(template_id) => {
                self.app.navigate(Page::Editor { template_id });
                false
            }
            Msg::Delete(id) => {
                let question = self.app.tr("Supprimer ce modèle ?", "حذف هذا النموذج؟");
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message(question).ok())
                    .unwrap_or(false);
                if !confirmed {
                    return false;
                }
                let api = self.app.api();
                let locale = self.app.locale;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.delete_template(&id).await {
                        Ok(()) => link.send_message(Msg::Deleted),
                        Err(e) => link.send_message(Msg::Failed(failure(locale, ("suppression", "الحذف"), &e))),
                    }
                });
                false
            }
            Msg::Deleted => {
                show_toast(self.app.tr("Modèle supprimé.", "تم حذف النموذج."));
                self.reload(ctx);
                false
            }
            Msg::Failed(message) => {
                self.loading = false;
                show_toast(&message);
                true
            }
            Msg::SignOut => {
                self.app.dispatch.emit(ContextAction::AdminSignedOut);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();
        html! {
            <>
                <div class="card">
                    <div class="actions" style="justify-content: space-between;">
                        <h2>{ app.tr("Modèles", "النماذج") }</h2>
                        <div>
                            <button class="btn" onclick={link.callback(|_| Msg::Edit(None))}>
                                { app.tr("Nouveau modèle", "نموذج جديد") }
                            </button>
                            <button class="btn secondary" onclick={link.callback(|_| Msg::SignOut)}>
                                { app.tr("Quitter l'administration", "الخروج من الإدارة") }
                            </button>
                        </div>
                    </div>
                    {
                        if self.loading {
                            html! { <p class="muted">{ app.tr("Chargement...", "جار التحميل...") }</p> }
                        } else {
                            self.templates_table(ctx)
                        }
                    }
                </div>
                <CategoryPanel />
            </>
        }
    }
}

impl AdminDashboard {
    fn reload(&self, ctx: &Context<Self>) {
        let api = self.app.api();
        let locale = self.app.locale;
        let link = ctx.link().clone();
        spawn_local(async move {
            let loaded = async {
                let templates = api.admin_templates().await?;
                let categories = api.admin_categories().await?;
                Ok::<_, crate::api::ApiError>((templates, categories))
            };
            match loaded.await {
                Ok((templates, categories)) => link.send_message(Msg::Loaded(templates, categories)),
                Err(e) => link.send_message(Msg::Failed(failure(locale, ("modèles", "النماذج"), &e))),
            }
        });
    }

    fn category_name(&self, id: &str) -> String {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name_in(self.app.locale).to_string())
            .unwrap_or_else(|| "—".to_string())
    }

    fn templates_table(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();
        html! {
            <table style="width: 100%;">
                <thead>
                    <tr>
                        <th>{ "#" }</th>
                        <th>{ app.tr("Nom", "الاسم") }</th>
                        <th>{ app.tr("Catégorie", "الفئة") }</th>
                        <th>{ app.tr("Champs", "الحقول") }</th>
                        <th>{ app.tr("Publié", "منشور") }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for self.templates.iter().map(|template| {
                        let edit_id = template.id.clone();
                        let delete_id = template.id.clone();
                        html! {
                            <tr>
                                <td>{ template.order }</td>
                                <td>
                                    { template.name_in(app.locale) }
                                    {
                                        if template.has_body() {
                                            html! {}
                                        } else {
                                            html! { <span class="muted">{ app.tr(" (sans contenu)", " (بدون محتوى)") }</span> }
                                        }
                                    }
                                </td>
                                <td>{ self.category_name(&template.category_id) }</td>
                                <td>{ template.fields.len() }</td>
                                <td>{ if template.is_active { "✓" } else { "" } }</td>
                                <td>
                                    <button class="btn secondary" onclick={link.callback(move |_| Msg::Edit(Some(edit_id.clone())))}>
                                        { app.tr("Modifier", "تعديل") }
                                    </button>
                                    <button class="btn danger" onclick={link.callback(move |_| Msg::Delete(delete_id.clone()))}>
                                        { app.tr("Supprimer", "حذف") }
                                    </button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    }
}
