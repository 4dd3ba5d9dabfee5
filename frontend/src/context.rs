//! Application context shared with every page through a
//! `ContextProvider<AppContext>`.
//!
//! It is created by [`crate::app::App`] from `/api/session` at startup and
//! rebuilt from scratch on sign-out. Pages never mutate it directly; they send
//! a [`ContextAction`] through `dispatch`.

use common::locale::{Locale, Theme};
use common::model::profile::Identity;
use common::requests::AdminCredentials;
use yew::html::Scope;
use yew::{Callback, Component, ContextHandle};

use crate::api::Api;
use crate::app::Page;

#[derive(Clone, PartialEq, Default)]
pub struct AppContext {
    pub identity: Option<Identity>,
    pub locale: Locale,
    pub theme: Theme,
    /// Credentials accepted by the admin login, kept for the admin session.
    pub admin: Option<AdminCredentials>,
    pub dispatch: Callback<ContextAction>,
}

pub enum ContextAction {
    Navigate(Page),
    SetLocale(Locale),
    SetTheme(Theme),
    AdminSignedIn(AdminCredentials),
    AdminSignedOut,
    SignOut,
}

impl AppContext {
    pub fn api(&self) -> Api {
        Api::new(self.locale, self.admin.clone())
    }

    pub fn navigate(&self, page: Page) {
        self.dispatch.emit(ContextAction::Navigate(page));
    }

    /// Picks the text for the current locale.
    pub fn tr(&self, fr: &'static str, ar: &'static str) -> &'static str {
        self.locale.pick(fr, ar)
    }
}

/// Current context plus a subscription that turns later changes into
/// `on_change` messages. Keep the handle alive as long as the component.
pub fn subscribe<C: Component>(
    link: &Scope<C>,
    on_change: impl Fn(AppContext) -> C::Message + 'static,
) -> (AppContext, Option<ContextHandle<AppContext>>) {
    match link.context::<AppContext>(link.callback(on_change)) {
        Some((app, handle)) => (app, Some(handle)),
        None => (AppContext::default(), None),
    }
}
