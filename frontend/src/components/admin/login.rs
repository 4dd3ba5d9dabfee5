use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::requests::AdminCredentials;

use crate::context::{subscribe, AppContext, ContextAction};
use crate::helpers::show_toast;
use crate::i18n::failure;

pub enum Msg {
    ContextChanged(AppContext),
    SetEmail(String),
    SetPassword(String),
    Submit,
    Accepted(AdminCredentials),
    Rejected,
    Failed(String),
}

pub struct AdminLogin {
    app: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
    credentials: AdminCredentials,
    error: Option<&'static str>,
    busy: bool,
}

impl Component for AdminLogin {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = subscribe(ctx.link(), Msg::ContextChanged);
        Self {
            app,
            _context_handle: handle,
            credentials: AdminCredentials {
                email: String::new(),
                password: String::new(),
            },
            error: None,
            busy: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(app) => {
                self.app = app;
                true
            }
            Msg::SetEmail(email) => {
                self.credentials.email = email;
                false
            }
            Msg::SetPassword(password) => {
                self.credentials.password = password;
                false
            }
            Msg::Submit => {
                if self.credentials.email.trim().is_empty() || self.credentials.password.is_empty() {
                    self.error = Some(self.app.tr("Saisissez l'e-mail et le mot de passe.", "أدخل البريد الإلكتروني وكلمة المرور."));
                    return true;
                }
                self.busy = true;
                self.error = None;
                let api = self.app.api();
                let credentials = self.credentials.clone();
                let locale = self.app.locale;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.admin_login(&credentials).await {
                        Ok(true) => link.send_message(Msg::Accepted(credentials)),
                        Ok(false) => link.send_message(Msg::Rejected),
                        Err(e) => link.send_message(Msg::Failed(failure(locale, ("connexion", "تسجيل الدخول"), &e))),
                    }
                });
                true
            }
            Msg::Accepted(credentials) => {
                self.busy = false;
                self.app.dispatch.emit(ContextAction::AdminSignedIn(credentials));
                false
            }
            Msg::Rejected => {
                self.busy = false;
                self.error = Some(self.app.tr("Identifiants incorrects.", "بيانات الدخول غير صحيحة."));
                true
            }
            Msg::Failed(message) => {
                self.busy = false;
                show_toast(&message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = &self.app;
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        html! {
            <div class="card" style="max-width: 420px; margin: 0 auto;">
                <h2>{ app.tr("Administration", "الإدارة") }</h2>
                <form {onsubmit}>
                    <div class={classes!("form-field", self.error.is_some().then_some("invalid"))}>
                        <label>{ app.tr("E-mail", "البريد الإلكتروني") }</label>
                        <input
                            type="email"
                            dir="ltr"
                            oninput={link.callback(|e: InputEvent| Msg::SetEmail(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </div>
                    <div class={classes!("form-field", self.error.is_some().then_some("invalid"))}>
                        <label>{ app.tr("Mot de passe", "كلمة المرور") }</label>
                        <input
                            type="password"
                            dir="ltr"
                            oninput={link.callback(|e: InputEvent| Msg::SetPassword(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                        {
                            match self.error {
                                Some(error) => html! { <span class="field-error">{ error }</span> },
                                None => html! {},
                            }
                        }
                    </div>
                    <button class="btn" type="submit" disabled={self.busy}>
                        { if self.busy { app.tr("Vérification...", "جار التحقق...") } else { app.tr("Se connecter", "تسجيل الدخول") } }
                    </button>
                </form>
            </div>
        }
    }
}
