//! Category table with an inline create/edit form.

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::category::{Category, CategoryInput};

use crate::context::{subscribe, AppContext};
use crate::helpers::show_toast;
use crate::i18n::failure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    NameAr,
    Description,
    DescriptionAr,
    Order,
}

pub enum Msg {
    ContextChanged(AppContext),
    Loaded(Vec<Category>),
    Edit(Option<Category>),
    Set(CategoryField, String),
    SetActive(bool),
    Cancel,
    Save,
    Delete(String),
    Changed(&'static str, &'static str),
    Failed(String),
}

pub struct CategoryPanel {
    app: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
    categories: Vec<Category>,
    /// Open form: the edited id (`None` for a new category) and its values.
    editing: Option<(Option<String>, CategoryInput)>,
}

impl Component for CategoryPanel {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        let panel = Self {
            app,
            _context_handle: handle,
            categories: Vec::new(),
            editing: None,
        };
        panel.reload(ctx);
        panel
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(app) => {
                self.app = app;
                true
            }
            Msg::Loaded(categories) => {
                self.categories = categories;
                true
            }
            Msg::Edit(category) => {
                self.editing = Some(match category {
                    Some(category) => (Some(category.id.clone()), CategoryInput::from(&category)),
                    None => {
                        let next = self.categories.iter().map(|c| c.order).max().unwrap_or(0) + 1;
                        (None, CategoryInput::new("", "", "", "", next))
                    }
                });
                true
            }
            Msg::Set(field, value) => {
                if let Some((_, input)) = &mut self.editing {
                    match field {
                        CategoryField::Name => input.name = value,
                        CategoryField::NameAr => input.name_ar = value,
                        CategoryField::Description => input.description = value,
                        CategoryField::DescriptionAr => input.description_ar = value,
                        CategoryField::Order => input.order = value.trim().parse().unwrap_or(input.order),
                    }
                }
                false
            }
            Msg::SetActive(active) => {
                if let Some((_, input)) = &mut self.editing {
                    input.is_active = active;
                }
                false
            }
            Msg::Cancel => {
                self.editing = None;
                true
            }
            Msg::Save => {
                let Some((id, input)) = self.editing.clone() else {
                    return false;
                };
                if input.name.trim().is_empty() || input.name_ar.trim().is_empty() {
                    show_toast(self.app.tr("Le nom est requis dans les deux langues.", "الاسم مطلوب باللغتين."));
                    return false;
                }
                let api = self.app.api();
                let locale = self.app.locale;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.save_category(id.as_deref(), &input).await {
                        Ok(_) => link.send_message(Msg::Changed("Catégorie enregistrée.", "تم حفظ الفئة.")),
                        Err(e) => link.send_message(Msg::Failed(failure(locale, ("catégorie", "الفئة"), &e))),
                    }
                });
                false
            }
            Msg::Delete(id) => {
                let question = self.app.tr(
                    "Supprimer cette catégorie ? Ses modèles sont conservés.",
                    "حذف هذه الفئة؟ ستبقى نماذجها محفوظة.",
                );
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
                    match api.delete_category(&id).await {
                        Ok(()) => link.send_message(Msg::Changed("Catégorie supprimée.", "تم حذف الفئة.")),
                        Err(e) => link.send_message(Msg::Failed(failure(locale, ("suppression", "الحذف"), &e))),
                    }
                });
                false
            }
            Msg::Changed(fr, ar) => {
                show_toast(self.app.tr(fr, ar));
                self.editing = None;
                self.reload(ctx);
                true
            }
            Msg::Failed(message) => {
                show_toast(&message);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();
        html! {
            <div class="card">
                <h2>{ app.tr("Catégories", "الفئات") }</h2>
                <table style="width: 100%;">
                    <thead>
                        <tr>
                            <th>{ "#" }</th>
                            <th>{ "Nom" }</th>
                            <th>{ "الاسم" }</th>
                            <th>{ app.tr("Publiée", "منشورة") }</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for self.categories.iter().map(|category| {
                            let edited = category.clone();
                            let id = category.id.clone();
                            html! {
                                <tr>
                                    <td>{ category.order }</td>
                                    <td>{ category.name.clone() }</td>
                                    <td dir="rtl">{ category.name_ar.clone() }</td>
                                    <td>{ if category.is_active { "✓" } else { "" } }</td>
                                    <td>
                                        <button class="btn secondary" onclick={link.callback(move |_| Msg::Edit(Some(edited.clone())))}>
                                            { app.tr("Modifier", "تعديل") }
                                        </button>
                                        <button class="btn danger" onclick={link.callback(move |_| Msg::Delete(id.clone()))}>
                                            { app.tr("Supprimer", "حذف") }
                                        </button>
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                {
                    match &self.editing {
                        Some((_, input)) => self.form_view(ctx, input),
                        None => html! {
                            <button class="btn" onclick={link.callback(|_| Msg::Edit(None))}>
                                { app.tr("Nouvelle catégorie", "فئة جديدة") }
                            </button>
                        },
                    }
                }
            </div>
        }
    }
}

impl CategoryPanel {
    fn reload(&self, ctx: &Context<Self>) {
        let api = self.app.api();
        let locale = self.app.locale;
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.admin_categories().await {
                Ok(categories) => link.send_message(Msg::Loaded(categories)),
                Err(e) => link.send_message(Msg::Failed(failure(locale, ("catégories", "الفئات"), &e))),
            }
        });
    }

    fn form_view(&self, ctx: &Context<Self>, input: &CategoryInput) -> Html {
        let app = &self.app;
        let link = ctx.link();
        let text = |label: &'static str, value: String, field: CategoryField, dir: &'static str| {
            html! {
                <div class="form-field">
                    <label>{ label }</label>
                    <input
                        {dir}
                        {value}
                        oninput={link.callback(move |e: InputEvent| {
                            Msg::Set(field, e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </div>
            }
        };
        html! {
            <div class="grid">
                { text("Nom (FR)", input.name.clone(), CategoryField::Name, "ltr") }
                { text("الاسم (AR)", input.name_ar.clone(), CategoryField::NameAr, "rtl") }
                { text("Description (FR)", input.description.clone(), CategoryField::Description, "ltr") }
                { text("الوصف (AR)", input.description_ar.clone(), CategoryField::DescriptionAr, "rtl") }
                { text(app.tr("Ordre", "الترتيب"), input.order.to_string(), CategoryField::Order, "ltr") }
                <div class="form-field">
                    <label>
                        <input
                            type="checkbox"
                            checked={input.is_active}
                            onchange={link.callback(|e: Event| Msg::SetActive(e.target_unchecked_into::<HtmlInputElement>().checked()))}
                        />
                        { " " }{ app.tr("Publiée", "منشورة") }
                    </label>
                </div>
                <div class="actions">
                    <button class="btn" onclick={link.callback(|_| Msg::Save)}>{ app.tr("Enregistrer", "حفظ") }</button>
                    <button class="btn secondary" onclick={link.callback(|_| Msg::Cancel)}>{ app.tr("Annuler", "إلغاء") }</button>
                </div>
            </div>
        }
    }
}
