//! Admin landing page and reference tables.

use crate::app::Route;
use crate::core::session::Session;
use crate::core::store::{CalculatorState, LoadPhase};
use crate::features::admin::logic::{AdminSection, element_type_name, extra_summary, format_score};
use scorecalc_api_models::{CategoryResponse, ElementResponse, ElementTypeResponse, ExerciseResponse};
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::{use_selector, use_selector_with_deps};

async fn load_section(session: &Session, section: AdminSection, force: bool) {
    match section {
        AdminSection::Categories => session.load_categories(force).await,
        AdminSection::Elements => {
            session.load_element_types(false).await;
            session.load_elements(force).await;
        }
        AdminSection::ElementTypes => session.load_element_types(force).await,
        AdminSection::Exercises => session.load_exercises(force).await,
    }
}

fn status_label(phase: LoadPhase, rows: Option<usize>) -> String {
    match (phase, rows) {
        (LoadPhase::Loading, _) => "загрузка…".to_string(),
        (_, Some(rows)) => format!("записей: {rows}"),
        (LoadPhase::NotLoaded | LoadPhase::Loaded, None) => "не загружено".to_string(),
    }
}

#[function_component(AdminHome)]
pub(crate) fn admin_home() -> Html {
    let statuses = use_selector(|state: &CalculatorState| {
        AdminSection::all().map(|section| (section, section.status(state)))
    });

    html! {
        <section class="admin-home">
            <h2>{"Администрирование"}</h2>
            <ul class="admin-sections">
                {for statuses.iter().map(|(section, (phase, rows))| html! {
                    <li>
                        <Link<Route> to={Route::admin_section(*section)}>{section.title()}</Link<Route>>
                        <span class="muted">{status_label(*phase, *rows)}</span>
                    </li>
                })}
            </ul>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct AdminPageProps {
    pub(crate) section: AdminSection,
}

#[function_component(AdminPage)]
pub(crate) fn admin_page(props: &AdminPageProps) -> Html {
    let session = use_context::<Session>();
    let section = props.section;
    let status = use_selector_with_deps(
        |state: &CalculatorState, section: &AdminSection| section.status(state),
        section,
    );
    let categories = use_selector(|state: &CalculatorState| state.categories.value.clone());
    let elements = use_selector(|state: &CalculatorState| state.elements.value.clone());
    let element_types = use_selector(|state: &CalculatorState| state.element_types.value.clone());
    let exercises = use_selector(|state: &CalculatorState| state.exercises.value.clone());

    {
        let session = session.clone();
        use_effect_with_deps(
            move |section: &AdminSection| {
                if let Some(session) = session {
                    let section = *section;
                    yew::platform::spawn_local(async move {
                        load_section(&session, section, false).await;
                    });
                }
                || ()
            },
            section,
        );
    }

    let on_refresh = Callback::from(move |_: MouseEvent| {
        if let Some(session) = session.clone() {
            yew::platform::spawn_local(async move {
                load_section(&session, section, true).await;
            });
        }
    });

    let (phase, rows) = *status;
    let table = match section {
        AdminSection::Categories => (*categories).as_deref().map(categories_table),
        AdminSection::Elements => (*elements).as_deref().map(|rows| {
            elements_table(rows, (*element_types).as_deref().unwrap_or_default())
        }),
        AdminSection::ElementTypes => (*element_types).as_deref().map(element_types_table),
        AdminSection::Exercises => (*exercises).as_deref().map(exercises_table),
    };

    html! {
        <section class="admin-page">
            <header>
                <Link<Route> to={Route::Admin}>{"← Администрирование"}</Link<Route>>
                <h2>{section.title()}</h2>
                <span class="muted">{status_label(phase, rows)}</span>
                <button onclick={on_refresh} disabled={phase == LoadPhase::Loading}>{"Обновить"}</button>
            </header>
            {table.unwrap_or_default()}
        </section>
    }
}

fn categories_table(rows: &[CategoryResponse]) -> Html {
    html! {
        <table class="table">
            <thead><tr><th>{"ID"}</th><th>{"Название"}</th><th>{"Уровень"}</th></tr></thead>
            <tbody>
                {for rows.iter().map(|row| html! {
                    <tr><td>{row.id.to_string()}</td><td>{row.name.clone()}</td><td>{row.level.to_string()}</td></tr>
                })}
            </tbody>
        </table>
    }
}

fn elements_table(rows: &[ElementResponse], types: &[ElementTypeResponse]) -> Html {
    html! {
        <table class="table">
            <thead>
                <tr>
                    <th>{"ID"}</th><th>{"Название"}</th><th>{"Уровень"}</th>
                    <th>{"Оценка"}</th><th>{"Тип"}</th><th>{"Прочее"}</th>
                </tr>
            </thead>
            <tbody>
                {for rows.iter().map(|row| html! {
                    <tr>
                        <td>{row.id.to_string()}</td>
                        <td>{row.name.clone()}</td>
                        <td>{row.level.to_string()}</td>
                        <td>{format_score(row.score)}</td>
                        <td>{element_type_name(types, row.element_type_id)}</td>
                        <td class="muted">{extra_summary(&row.extra)}</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn element_types_table(rows: &[ElementTypeResponse]) -> Html {
    html! {
        <table class="table">
            <thead><tr><th>{"ID"}</th><th>{"Название"}</th><th>{"Прочее"}</th></tr></thead>
            <tbody>
                {for rows.iter().map(|row| html! {
                    <tr><td>{row.id.to_string()}</td><td>{row.name.clone()}</td><td class="muted">{extra_summary(&row.extra)}</td></tr>
                })}
            </tbody>
        </table>
    }
}

fn exercises_table(rows: &[ExerciseResponse]) -> Html {
    html! {
        <table class="table">
            <thead><tr><th>{"ID"}</th><th>{"Название"}</th><th>{"Прочее"}</th></tr></thead>
            <tbody>
                {for rows.iter().map(|row| html! {
                    <tr><td>{row.id.to_string()}</td><td>{row.name.clone()}</td><td class="muted">{extra_summary(&row.extra)}</td></tr>
                })}
            </tbody>
        </table>
    }
}
