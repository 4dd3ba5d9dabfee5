//! Template catalog: active categories as filter chips and the active
//! templates of the selected category.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::category::Category;
use common::model::template::Template;

use crate::app::Page;
use crate::context::{subscribe, AppContext};
use crate::helpers::show_toast;
use crate::i18n::failure;

pub enum Msg {
    ContextChanged(AppContext),
    CategoriesLoaded(Vec<Category>),
    TemplatesLoaded(Vec<Template>),
    SelectCategory(Option<String>),
    Open(String),
}

pub struct Catalog {
    app: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
    categories: Vec<Category>,
    templates: Vec<Template>,
    selected: Option<String>,
    loading: bool,
}

impl Component for Catalog {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        let catalog = Self {
            app,
            _context_handle: handle,
            categories: Vec::new(),
            templates: Vec::new(),
            selected: None,
            loading: true,
        };
        catalog.load_categories(ctx);
        catalog.load_templates(ctx);
        catalog
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(app) => {
                self.app = app;
                true
            }
            Msg::CategoriesLoaded(categories) => {
                self.categories = categories;
                true
            }
            Msg::TemplatesLoaded(templates) => {
                self.templates = templates;
                self.loading = false;
                true
            }
            Msg::SelectCategory(category) => {
                if self.selected == category {
                    return false;
                }
                self.selected = category;
                self.loading = true;
                self.load_templates(ctx);
                true
            }
            Msg::Open(template_id) => {
                self.app.navigate(Page::Form {
                    template_id,
                    saved: None,
                });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();

        let all_chip = html! {
            <button
                class={classes!("chip", self.selected.is_none().then_some("active"))}
                onclick={link.callback(|_| Msg::SelectCategory(None))}
            >
                { app.tr("Toutes", "الكل") }
            </button>
        };
        let chips = self.categories.iter().map(|category| {
            let id = category.id.clone();
            let active = self.selected.as_deref() == Some(category.id.as_str());
            html! {
                <button
                    class={classes!("chip", active.then_some("active"))}
                    title={category.description_in(app.locale).to_string()}
                    onclick={link.callback(move |_| Msg::SelectCategory(Some(id.clone())))}
                >
                    { category.name_in(app.locale) }
                </button>
            }
        });

        html! {
            <>
                <div class="card">
                    <h2>{ app.tr("Choisissez un document", "اختر وثيقة") }</h2>
                    { all_chip }
                    { for chips }
                </div>
                {
                    if self.loading {
                        html! { <p class="muted">{ app.tr("Chargement...", "جار التحميل...") }</p> }
                    } else if self.templates.is_empty() {
                        html! { <p class="muted">{ app.tr("Aucun modèle dans cette catégorie.", "لا توجد نماذج في هذه الفئة.") }</p> }
                    } else {
                        html! { <div class="grid">{ for self.templates.iter().map(|t| self.template_card(ctx, t)) }</div> }
                    }
                }
            </>
        }
    }
}

impl Catalog {
    fn template_card(&self, ctx: &Context<Self>, template: &Template) -> Html {
        let app = &self.app;
        let id = template.id.clone();
        let ready = template.has_body();
        html! {
            <div class="card">
                <h3>{ template.name_in(app.locale) }</h3>
                <p>{ template.description_in(app.locale) }</p>
                <p class="muted">
                    { format!("{} {}", template.fields.len(), app.tr("champ(s)", "حقل")) }
                    {
                        if template.estimated_time.is_empty() {
                            html! {}
                        } else {
                            html! { <>{ " · " }{ template.estimated_time.clone() }</> }
                        }
                    }
                </p>
                <button
                    class="btn"
                    disabled={!ready}
                    onclick={ctx.link().callback(move |_| Msg::Open(id.clone()))}
                >
                    {
                        if ready {
                            app.tr("Remplir", "ملء")
                        } else {
                            app.tr("Bientôt disponible", "قريباً")
                        }
                    }
                </button>
            </div>
        }
    }

    fn load_categories(&self, ctx: &Context<Self>) {
        let api = self.app.api();
        let locale = self.app.locale;
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.categories().await {
                Ok(categories) => link.send_message(Msg::CategoriesLoaded(categories)),
                Err(e) => show_toast(&failure(locale, ("catégories", "الفئات"), &e)),
            }
        });
    }

    fn load_templates(&self, ctx: &Context<Self>) {
        let api = self.app.api();
        let locale = self.app.locale;
        let category = self.selected.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.templates(category.as_deref()).await {
                Ok(templates) => link.send_message(Msg::TemplatesLoaded(templates)),
                Err(e) => {
                    show_toast(&failure(locale, ("modèles", "النماذج"), &e));
                    link.send_message(Msg::TemplatesLoaded(Vec::new()));
                }
            }
        });
    }
}
