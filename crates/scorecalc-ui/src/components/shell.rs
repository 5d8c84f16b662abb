use crate::app::Route;
use crate::core::session::Session;
use crate::core::store::{CalculatorState, is_authorized};
use crate::core::toast::{ToastKind, ToastStore};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub(crate) children: Children,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let session = use_context::<Session>();
    let navigator = use_navigator();
    let active = use_route::<Route>().unwrap_or(Route::NotFound);
    let authorized = use_selector(is_authorized);

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(session) = &session {
            session.reset();
        }
        Dispatch::<ToastStore>::new().reduce_mut(|store| {
            store.push(ToastKind::Info, "Вы вышли из системы");
        });
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });

    html! {
        <div class="app-shell">
            <header class="topbar">
                <strong class="brand">{"Scorecalc"}</strong>
                <nav>
                    {nav_item(Route::Calculator, "Калькулятор", &active)}
                    {nav_item(Route::Admin, "Администрирование", &active)}
                </nav>
                if *authorized {
                    <button class="ghost" onclick={on_logout}>{"Выйти"}</button>
                } else {
                    {nav_item(Route::Login, "Войти", &active)}
                }
            </header>
            <main class="content">
                {for props.children.iter()}
            </main>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let classes = classes!(
        "nav-item",
        if *active == route {
            Some("active")
        } else {
            None
        }
    );
    html! {
        <Link<Route> to={route} classes={classes}>{label}</Link<Route>>
    }
}
