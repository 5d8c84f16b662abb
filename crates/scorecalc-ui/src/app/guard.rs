//! Route guard wrapping the router switch.
//!
//! # Design
//! - Routes that need no auth check render immediately.
//! - Other routes render only after [`check_navigation`] clears the exact path.

use crate::app::Route;
use crate::core::guard::{
    GuardDecision, REDIRECT_QUERY_KEY, Redirect, RouteTarget, check_navigation,
};
use crate::core::session::Session;
use gloo::console;
use std::collections::HashMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct RouteGuardProps {
    pub(crate) children: Children,
}

#[function_component(RouteGuard)]
pub(crate) fn route_guard(props: &RouteGuardProps) -> Html {
    let session = use_context::<Session>();
    let navigator = use_navigator();
    let location = use_location();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let full_path = location
        .as_ref()
        .map(|location| format!("{}{}", location.path(), location.query_str()))
        .unwrap_or_default();
    let target = RouteTarget::new(full_path, route.requires_auth());
    let cleared = use_state(|| None as Option<String>);

    {
        let cleared = cleared.clone();
        use_effect_with_deps(
            move |target: &RouteTarget| {
                if let (Some(session), Some(navigator)) = (session, navigator) {
                    if target.needs_auth_check() {
                        let target = target.clone();
                        yew::platform::spawn_local(async move {
                            match check_navigation(&session, &target).await {
                                GuardDecision::Proceed => cleared.set(Some(target.full_path)),
                                GuardDecision::Redirect(redirect) => {
                                    follow_redirect(&navigator, redirect);
                                }
                            }
                        });
                    }
                }
                || ()
            },
            target.clone(),
        );
    }

    let allowed = !target.needs_auth_check()
        || cleared.as_deref() == Some(target.full_path.as_str());
    if allowed {
        html! { <>{ for props.children.iter() }</> }
    } else {
        html! { <div class="route-pending" aria-busy="true"><span class="spinner"></span></div> }
    }
}

fn follow_redirect(navigator: &Navigator, redirect: Redirect) {
    match redirect {
        Redirect::Admin => navigator.replace(&Route::Admin),
        Redirect::Login { from } => {
            let query = HashMap::from([(REDIRECT_QUERY_KEY, from)]);
            if let Err(err) = navigator.replace_with_query(&Route::Login, &query) {
                console::error!("redirect failed", err.to_string());
            }
        }
    }
}
