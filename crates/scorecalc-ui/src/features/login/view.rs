//! Login page: credential form and post-login navigation.

use crate::app::{Route, use_form};
use crate::core::forms::FormSchema;
use crate::core::guard::{REDIRECT_QUERY_KEY, post_login_path};
use crate::core::session::Session;
use crate::features::login::schema::{LOGIN_FIELD, PASSWORD_FIELD, login_schema};
use gloo::console;
use scorecalc_api_models::AuthorizationData;
use std::borrow::Cow;
use std::collections::HashMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let schema = use_memo(|_| login_schema(), ());
    match schema.as_ref() {
        Ok(schema) => html! { <LoginForm schema={schema.clone()} /> },
        Err(err) => {
            console::error!("login schema failed to compile", err.to_string());
            html! { <p class="error">{"Форма входа недоступна"}</p> }
        }
    }
}

#[derive(Properties, PartialEq)]
struct LoginFormProps {
    schema: FormSchema,
}

#[function_component(LoginForm)]
fn login_form(props: &LoginFormProps) -> Html {
    let session = use_context::<Session>();
    let navigator = use_navigator();
    let location = use_location();
    let form = use_form(props.schema.clone());
    let busy = use_state(|| false);

    let redirect = location
        .and_then(|location| location.query::<HashMap<String, String>>().ok())
        .and_then(|mut query| query.remove(REDIRECT_QUERY_KEY));

    let on_submit = {
        let form = form.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let Some(values) = form.submit() else {
                return;
            };
            let auth = match values.value_as::<AuthorizationData>() {
                Ok(auth) => auth,
                Err(err) => {
                    console::error!("login form values are malformed", err.to_string());
                    return;
                }
            };
            let (Some(session), Some(navigator)) = (session.clone(), navigator.clone()) else {
                return;
            };
            let target = post_login_path(redirect.as_deref());
            let busy = busy.clone();
            busy.set(true);
            yew::platform::spawn_local(async move {
                let accepted = session.set_auth_data(auth).await;
                busy.set(false);
                if accepted {
                    navigate_to(&navigator, &target);
                }
            });
        })
    };

    let login = form.field(LOGIN_FIELD);
    let password = form.field(PASSWORD_FIELD);

    html! {
        <section class="login">
            <h2>{"Вход"}</h2>
            <form onsubmit={on_submit} novalidate=true>
                <label>
                    {"Логин"}
                    <input
                        type="text"
                        autocomplete="username"
                        value={login.value.clone()}
                        oninput={form.oninput(LOGIN_FIELD)}
                    />
                </label>
                if let Some(error) = login.visible_error() {
                    <p class="field-error">{error.to_string()}</p>
                }
                <label>
                    {"Пароль"}
                    <input
                        type="password"
                        autocomplete="current-password"
                        value={password.value.clone()}
                        oninput={form.oninput(PASSWORD_FIELD)}
                    />
                </label>
                if let Some(error) = password.visible_error() {
                    <p class="field-error">{error.to_string()}</p>
                }
                <button type="submit" disabled={*busy}>{"Войти"}</button>
            </form>
        </section>
    }
}

/// Push a local `path[?query]` through the router; unknown paths land on the admin page.
fn navigate_to(navigator: &Navigator, target: &str) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let route = Route::recognize(path)
        .filter(|route| *route != Route::NotFound)
        .unwrap_or(Route::Admin);
    if query.is_empty() {
        navigator.push(&route);
        return;
    }
    let pairs: Vec<(String, String)> = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (decode_component(key), decode_component(value)))
        .collect();
    if let Err(err) = navigator.push_with_query(&route, &pairs) {
        console::error!("post-login navigation failed", err.to_string());
        navigator.push(&route);
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), Cow::into_owned)
}
