//! Application root: session wiring, routing and the page switch.
//!
//! # Design
//! - Exactly one [`Session`] per app boot, shared through a context.
//! - The session pushes every state change into the yewdux store so views can select from it.

use crate::components::shell::AppShell;
use crate::components::toast::ToastHost;
use crate::core::api::ApiConfig;
use crate::core::session::Session;
use crate::core::store::CalculatorState;
use crate::features::admin::logic::AdminSection;
use crate::features::admin::view::{AdminHome, AdminPage};
use crate::features::calculator::view::CalculatorPage;
use crate::features::login::view::LoginPage;
use crate::services::api::HttpApiFactory;
use crate::services::storage::LocalCredentialStore;
use guard::RouteGuard;
use notifier::ToastNotifier;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

pub(crate) use forms::use_form;
pub(crate) use routes::Route;

mod forms;
mod guard;
mod notifier;
mod routes;

fn build_session() -> Session {
    Session::new(
        Rc::new(HttpApiFactory::new(ApiConfig::from_env())),
        Rc::new(LocalCredentialStore),
        Rc::new(ToastNotifier),
    )
}

#[function_component(ScorecalcApp)]
fn scorecalc_app() -> Html {
    let session = use_memo(|_| build_session(), ());
    {
        let session = (*session).clone();
        use_effect_with_deps(
            move |_| {
                let dispatch = Dispatch::<CalculatorState>::new();
                dispatch.set(session.snapshot());
                let subscription = session.subscribe(move |state| dispatch.set(state.clone()));
                move || drop(subscription)
            },
            (),
        );
    }

    html! {
        <ContextProvider<Session> context={(*session).clone()}>
            <BrowserRouter>
                <AppShell>
                    <RouteGuard>
                        <Switch<Route> render={switch} />
                    </RouteGuard>
                </AppShell>
                <ToastHost />
            </BrowserRouter>
        </ContextProvider<Session>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Calculator => html! { <CalculatorPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Admin => html! { <AdminHome /> },
        Route::AdminCategories => html! { <AdminPage section={AdminSection::Categories} /> },
        Route::AdminElements => html! { <AdminPage section={AdminSection::Elements} /> },
        Route::AdminElementTypes => html! { <AdminPage section={AdminSection::ElementTypes} /> },
        Route::AdminExercises => html! { <AdminPage section={AdminSection::Exercises} /> },
        Route::NotFound => html! {
            <section class="not-found">
                <h2>{"Страница не найдена"}</h2>
                <Link<Route> to={Route::Calculator}>{"На главную"}</Link<Route>>
            </section>
        },
    }
}

/// Mount the app into `#root`, or the document body when it is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ScorecalcApp>::with_root(root).render();
    } else {
        yew::Renderer::<ScorecalcApp>::new().render();
    }
}
