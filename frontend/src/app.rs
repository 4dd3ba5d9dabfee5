use gloo_console::log;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::BeforeUnloadEvent;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::locale::{Locale, Theme};
use common::model::saved_form::SavedForm;
use common::requests::{PreferencesUpdate, SessionResponse};

use crate::components::admin::{AdminDashboard, AdminLogin};
use crate::components::catalog::Catalog;
use crate::components::dashboard::Dashboard;
use crate::components::form::DynamicForm;
use crate::components::editor::TemplateEditor;
use crate::context::{AppContext, ContextAction};
use crate::helpers::show_toast;

#[derive(Clone, PartialEq)]
pub enum Page {
    Catalog,
    Form {
        template_id: String,
        saved: Option<SavedForm>,
    },
    Dashboard,
    AdminLogin,
    Admin,
    /// Template editor; `None` creates a new template.
    Editor { template_id: Option<String> },
}

pub enum Msg {
    SessionLoaded(SessionResponse),
    PreferencesLoaded(Locale, Theme),
    Action(ContextAction),
}

pub struct App {
    context: AppContext,
    page: Page,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        install_unload_guard();
        let context = fresh_context(ctx);
        load_session(ctx, &context);
        Self {
            context,
            page: Page::Catalog,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionLoaded(session) => {
                self.context.locale = session.locale;
                self.context.identity = session.identity;
                if self.context.identity.is_some() {
                    load_preferences(ctx, &self.context);
                }
                apply_document_settings(&self.context);
                true
            }
            Msg::PreferencesLoaded(locale, theme) => {
                self.context.locale = locale;
                self.context.theme = theme;
                apply_document_settings(&self.context);
                true
            }
            Msg::Action(action) => self.apply(ctx, action),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.context;
        let dispatch = ctx.link().callback(Msg::Action);
        let go = |page: Page| {
            let dispatch = dispatch.clone();
            Callback::from(move |_: MouseEvent| dispatch.emit(ContextAction::Navigate(page.clone())))
        };
        let toggle_locale = {
            let next = app.locale.toggled();
            let dispatch = dispatch.clone();
            Callback::from(move |_: MouseEvent| dispatch.emit(ContextAction::SetLocale(next)))
        };
        let toggle_theme = {
            let next = app.theme.toggled();
            let dispatch = dispatch.clone();
            Callback::from(move |_: MouseEvent| dispatch.emit(ContextAction::SetTheme(next)))
        };
        let admin_page = if app.admin.is_some() { Page::Admin } else { Page::AdminLogin };

        html! {
            <ContextProvider<AppContext> context={app.clone()}>
                <div class="app-bar" dir={app.locale.dir()}>
                    <span class="title" onclick={go(Page::Catalog)}>{ app.tr("Wathiqa", "وثيقة") }</span>
                    {
                        if app.identity.is_some() {
                            html! { <button onclick={go(Page::Dashboard)}>{ app.tr("Mon espace", "فضائي") }</button> }
                        } else {
                            html! {}
                        }
                    }
                    <button onclick={go(admin_page)}>{ app.tr("Administration", "الإدارة") }</button>
                    <button onclick={toggle_locale}>{ app.locale.toggled().code().to_uppercase() }</button>
                    <button onclick={toggle_theme}>
                        <i class="material-icons">{ if app.theme == Theme::Dark { "light_mode" } else { "dark_mode" } }</i>
                    </button>
                    {
                        if app.identity.is_some() || app.admin.is_some() {
                            let dispatch = dispatch.clone();
                            let onclick = Callback::from(move |_: MouseEvent| dispatch.emit(ContextAction::SignOut));
                            html! { <button {onclick}>{ app.tr("Déconnexion", "تسجيل الخروج") }</button> }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <div class="page" dir={app.locale.dir()}>
                    { self.page_view() }
                </div>
            </ContextProvider<AppContext>>
        }
    }
}

impl App {
    fn page_view(&self) -> Html {
        match &self.page {
            Page::Catalog => html! { <Catalog /> },
            Page::Form { template_id, saved } => html! {
                <DynamicForm
                    key={format!("{template_id}-{}", saved.as_ref().map(|s| s.id.as_str()).unwrap_or_default())}
                    template_id={template_id.clone()}
                    saved={saved.clone()}
                />
            },
            Page::Dashboard => html! { <Dashboard /> },
            Page::AdminLogin => html! { <AdminLogin /> },
            Page::Admin => html! { <AdminDashboard /> },
            Page::Editor { template_id } => html! {
                <TemplateEditor
                    key={template_id.clone().unwrap_or_default()}
                    template_id={template_id.clone()}
                />
            },
        }
    }

    fn apply(&mut self, ctx: &Context<Self>, action: ContextAction) -> bool {
        match action {
            ContextAction::Navigate(page) => {
                if page == self.page || !confirm_leaving(&self.context) {
                    return false;
                }
                let page = match page {
                    Page::Admin | Page::Editor { .. } if self.context.admin.is_none() => Page::AdminLogin,
                    page => page,
                };
                clear_dirty_flag();
                self.page = page;
            }
            ContextAction::SetLocale(locale) => {
                self.context.locale = locale;
                self.save_preferences(PreferencesUpdate {
                    language: Some(locale),
                    theme: None,
                });
            }
            ContextAction::SetTheme(theme) => {
                self.context.theme = theme;
                self.save_preferences(PreferencesUpdate {
                    language: None,
                    theme: Some(theme),
                });
            }
            ContextAction::AdminSignedIn(credentials) => {
                self.context.admin = Some(credentials);
                self.page = Page::Admin;
            }
            ContextAction::AdminSignedOut => {
                self.context.admin = None;
                self.page = Page::Catalog;
            }
            ContextAction::SignOut => {
                if !confirm_leaving(&self.context) {
                    return false;
                }
                clear_dirty_flag();
                let locale = self.context.locale;
                self.context = fresh_context(ctx);
                self.context.locale = locale;
                self.page = Page::Catalog;
                show_toast(self.context.tr("Vous êtes déconnecté.", "تم تسجيل خروجك."));
            }
        }
        apply_document_settings(&self.context);
        true
    }

    fn save_preferences(&self, update: PreferencesUpdate) {
        if self.context.identity.is_none() {
            return;
        }
        let api = self.context.api();
        spawn_local(async move {
            if let Err(e) = api.update_preferences(&update).await {
                log!(format!("Could not save preferences: {e}"));
            }
        });
    }
}

fn fresh_context(ctx: &Context<App>) -> AppContext {
    AppContext {
        dispatch: ctx.link().callback(Msg::Action),
        ..Default::default()
    }
}

fn load_session(ctx: &Context<App>, app: &AppContext) {
    let api = app.api();
    let link = ctx.link().clone();
    spawn_local(async move {
        match api.session().await {
            Ok(session) => link.send_message(Msg::SessionLoaded(session)),
            Err(e) => log!(format!("Could not load session: {e}")),
        }
    });
}

fn load_preferences(ctx: &Context<App>, app: &AppContext) {
    let api = app.api();
    let link = ctx.link().clone();
    spawn_local(async move {
        match api.profile().await {
            Ok(profile) => link.send_message(Msg::PreferencesLoaded(
                profile.preferences.language,
                profile.preferences.theme,
            )),
            Err(e) => log!(format!("Could not load profile: {e}")),
        }
    });
}

/// Mirrors locale and theme on `<html>` and `<body>`.
fn apply_document_settings(app: &AppContext) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(root) = document.document_element() {
        root.set_attribute("lang", app.locale.code()).ok();
        root.set_attribute("dir", app.locale.dir()).ok();
    }
    if let Some(body) = document.body() {
        let classes = body.class_list();
        match app.theme {
            Theme::Dark => classes.add_1("dark").ok(),
            Theme::Light => classes.remove_1("dark").ok(),
        };
    }
}

fn is_dirty() -> bool {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("app_dirty")).ok())
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn clear_dirty_flag() {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(&window, &JsValue::from_str("app_dirty"), &JsValue::FALSE);
    }
}

/// Asks before leaving a page with unsaved edits.
fn confirm_leaving(app: &AppContext) -> bool {
    if !is_dirty() {
        return true;
    }
    let question = app.tr(
        "Des modifications ne sont pas enregistrées. Quitter quand même ?",
        "هناك تعديلات غير محفوظة. هل تريد المغادرة؟",
    );
    web_sys::window()
        .and_then(|window| window.confirm_with_message(question).ok())
        .unwrap_or(true)
}

/// Browser-level guard for reloads and tab closes while edits are unsaved.
fn install_unload_guard() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let guard = Closure::<dyn Fn(BeforeUnloadEvent)>::new(|event: BeforeUnloadEvent| {
        if is_dirty() {
            event.prevent_default();
            event.set_return_value("unsaved");
        }
    });
    if window
        .add_event_listener_with_callback("beforeunload", guard.as_ref().unchecked_ref())
        .is_ok()
    {
        guard.forget();
    }
}
