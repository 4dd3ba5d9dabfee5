//! Personal space of an identified user: profile, counters, saved forms and
//! generation history.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::document::GeneratedDocument;
use common::model::profile::{UserProfile, UserStats};
use common::model::saved_form::SavedForm;

use crate::api::ApiError;
use crate::app::Page;
use crate::context::{subscribe, AppContext};
use crate::helpers::show_toast;
use crate::i18n::{failure, format_count, format_date};

pub enum Msg {
    ContextChanged(AppContext),
    Loaded {
        profile: UserProfile,
        stats: UserStats,
        saved_forms: Vec<SavedForm>,
        history: Vec<GeneratedDocument>,
    },
    Failed(ApiError),
    Resume(SavedForm),
    Delete(String),
    Deleted(String),
}

pub struct Dashboard {
    app: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
    profile: Option<UserProfile>,
    stats: UserStats,
    saved_forms: Vec<SavedForm>,
    history: Vec<GeneratedDocument>,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        let dashboard = Self {
            app,
            _context_handle: handle,
            profile: None,
            stats: UserStats::default(),
            saved_forms: Vec::new(),
            history: Vec::new(),
        };
        dashboard.load(ctx);
        dashboard
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(app) => {
                self.app = app;
                true
            }
            Msg::Loaded {
                profile,
                stats,
                saved_forms,
                history,
            } => {
                self.profile = Some(profile);
                self.stats = stats;
                self.saved_forms = saved_forms;
                self.history = history;
                true
            }
            Msg::Failed(e) => {
                if e.status() == Some(401) {
                    self.app.navigate(Page::Catalog);
                }
                show_toast(&failure(self.app.locale, ("espace personnel", "المساحة الشخصية"), &e));
                false
            }
            Msg::Resume(form) => {
                self.app.navigate(Page::Form {
                    template_id: form.template_id.clone(),
                    saved: Some(form),
                });
                false
            }
            Msg::Delete(id) => {
                let question = self.app.tr("Supprimer ce formulaire enregistré ?", "حذف هذا النموذج المحفوظ؟");
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message(question).ok())
                    .unwrap_or(false);
                if !confirmed {
                    return false;
                }
                let api = self.app.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.delete_saved_form(&id).await {
                        Ok(()) => link.send_message(Msg::Deleted(id)),
                        Err(e) => link.send_message(Msg::Failed(e)),
                    }
                });
                false
            }
            Msg::Deleted(id) => {
                self.saved_forms.retain(|form| form.id != id);
                self.stats.saved_forms_count = self.saved_forms.len() as i64;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let Some(profile) = &self.profile else {
            return html! { <p class="muted">{ app.tr("Chargement...", "جار التحميل...") }</p> };
        };
        let name = profile
            .display_name
            .clone()
            .or_else(|| profile.email.clone())
            .unwrap_or_else(|| profile.uid.clone());

        html! {
            <>
                <div class="card">
                    <h2>{ format!("{} {}", app.tr("Bonjour,", "مرحباً،"), name) }</h2>
                    <div class="grid">
                        { stat(format_count(self.stats.saved_forms_count, app.locale), app.tr("Formulaires enregistrés", "نماذج محفوظة")) }
                        { stat(format_count(self.stats.generated_docs_count, app.locale), app.tr("Documents générés", "وثائق منشأة")) }
                        { stat(format_count(self.stats.this_month_count, app.locale), app.tr("Ce mois-ci", "هذا الشهر")) }
                        { stat(format_count(self.stats.total_downloads, app.locale), app.tr("Téléchargements", "التنزيلات")) }
                    </div>
                </div>
                { self.saved_forms_view(ctx) }
                { self.history_view() }
            </>
        }
    }
}

fn stat(value: String, label: &'static str) -> Html {
    html! {
        <div class="card">
            <h3>{ value }</h3>
            <p class="muted">{ label }</p>
        </div>
    }
}

impl Dashboard {
    fn load(&self, ctx: &Context<Self>) {
        let api = self.app.api();
        let link = ctx.link().clone();
        spawn_local(async move {
            let loaded = async {
                Ok::<_, ApiError>(Msg::Loaded {
                    profile: api.profile().await?,
                    stats: api.stats().await?,
                    saved_forms: api.saved_forms().await?,
                    history: api.history().await?,
                })
            };
            match loaded.await {
                Ok(msg) => link.send_message(msg),
                Err(e) => link.send_message(Msg::Failed(e)),
            }
        });
    }

    fn saved_forms_view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();
        html! {
            <div class="card">
                <h2>{ app.tr("Formulaires enregistrés", "النماذج المحفوظة") }</h2>
                {
                    if self.saved_forms.is_empty() {
                        html! { <p class="muted">{ app.tr("Aucun formulaire enregistré.", "لا توجد نماذج محفوظة.") }</p> }
                    } else {
                        html! {
                            <table style="width: 100%;">
                                <tbody>
                                    { for self.saved_forms.iter().map(|form| {
                                        let resumed = form.clone();
                                        let id = form.id.clone();
                                        html! {
                                            <tr>
                                                <td>{ form.title.clone() }</td>
                                                <td class="muted">{ format_date(&form.updated_at) }</td>
                                                <td>
                                                    <button class="btn secondary" onclick={link.callback(move |_| Msg::Resume(resumed.clone()))}>
                                                        { app.tr("Reprendre", "متابعة") }
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
                        }
                    }
                }
            </div>
        }
    }

    fn history_view(&self) -> Html {
        let app = &self.app;
        html! {
            <div class="card">
                <h2>{ app.tr("Historique", "السجل") }</h2>
                {
                    if self.history.is_empty() {
                        html! { <p class="muted">{ app.tr("Aucun document généré.", "لم يتم إنشاء أي وثيقة.") }</p> }
                    } else {
                        html! {
                            <table style="width: 100%;">
                                <thead>
                                    <tr>
                                        <th>{ app.tr("Document", "الوثيقة") }</th>
                                        <th>{ app.tr("Date", "التاريخ") }</th>
                                        <th>{ app.tr("Téléchargements", "التنزيلات") }</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for self.history.iter().map(|document| html! {
                                        <tr>
                                            <td>{ document.title.clone() }</td>
                                            <td>{ format_date(&document.generated_at) }</td>
                                            <td>{ format_count(document.download_count, app.locale) }</td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        }
                    }
                }
            </div>
        }
    }
}
