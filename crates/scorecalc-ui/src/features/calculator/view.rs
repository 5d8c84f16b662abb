//! Calculator page: category and gender selectors, combo editor, credited score.

use crate::core::session::Session;
use crate::core::store::{CalculatorState, credit_elements, score};
use crate::features::admin::logic::format_score;
use crate::features::calculator::state::{Combo, Gender};
use scorecalc_api_models::{CategoryResponse, ElementResponse, EntityId};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(CalculatorPage)]
pub(crate) fn calculator_page() -> Html {
    let session = use_context::<Session>();
    let content = use_selector(|state: &CalculatorState| state.content.clone());
    let selected = use_selector(|state: &CalculatorState| state.selected_category.clone());
    let gender = use_selector(|state: &CalculatorState| state.gender);
    let combos = use_selector(|state: &CalculatorState| state.combos.clone());
    let credited = use_selector(credit_elements);
    let total = use_selector(score);

    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(session) = session {
                    yew::platform::spawn_local(async move { session.load_content(false).await });
                }
                || ()
            },
            (),
        );
    }

    let Some(session) = session else {
        return html! {};
    };
    let Some(loaded) = content.value.as_ref() else {
        let label = if content.loading {
            "Загрузка…"
        } else {
            "Данные недоступны"
        };
        return html! { <section class="calculator"><p class="muted">{label}</p></section> };
    };

    let on_category = {
        let session = session.clone();
        let categories = loaded.categories.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let category = select
                .value()
                .parse::<EntityId>()
                .ok()
                .and_then(|id| categories.iter().find(|category| category.id == id))
                .cloned();
            session.select_category(category);
        })
    };
    let on_gender = {
        let session = session.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            session.set_gender(Gender::from_value(&select.value()));
        })
    };
    let on_add_combo = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.add_combo())
    };
    let on_clear = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.clear_combos())
    };

    html! {
        <section class="calculator">
            <div class="selectors">
                <label>
                    {"Категория"}
                    <select onchange={on_category}>
                        <option value="" selected={selected.is_none()}>{"Не выбрана"}</option>
                        {for loaded.categories.iter().map(|category| category_option(category, (*selected).as_ref()))}
                    </select>
                </label>
                <label>
                    {"Пол"}
                    <select onchange={on_gender}>
                        <option value={Gender::Male.as_str()} selected={*gender == Gender::Male}>{"Мужской"}</option>
                        <option value={Gender::Female.as_str()} selected={*gender == Gender::Female}>{"Женский"}</option>
                    </select>
                </label>
            </div>
            <div class="combos">
                {for combos.iter().enumerate().map(|(index, combo)| render_combo(&session, index, combo, &loaded.elements))}
                <div class="combo-actions">
                    <button onclick={on_add_combo}>{"Добавить связку"}</button>
                    <button class="ghost" onclick={on_clear}>{"Очистить"}</button>
                </div>
            </div>
            <aside class="summary">
                <h3>{"Засчитанные элементы"}</h3>
                if credited.is_empty() {
                    <p class="muted">{"Нет засчитанных элементов"}</p>
                } else {
                    <ul>
                        {for credited.iter().map(|element| html! {
                            <li>{format!("{} ({})", element.name, format_score(element.score))}</li>
                        })}
                    </ul>
                }
                <p class="score"><strong>{"Итого: "}</strong>{format_score(*total)}</p>
            </aside>
        </section>
    }
}

fn category_option(category: &CategoryResponse, selected: Option<&CategoryResponse>) -> Html {
    let is_selected = selected.is_some_and(|current| current.id == category.id);
    html! {
        <option value={category.id.to_string()} selected={is_selected}>
            {format!("{} (уровень {})", category.name, category.level)}
        </option>
    }
}

fn render_combo(
    session: &Session,
    index: usize,
    combo: &Combo,
    elements: &[ElementResponse],
) -> Html {
    let on_pick = {
        let session = session.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Ok(id) = select.value().parse::<EntityId>() {
                session.push_element(index, id);
            }
            select.set_value("");
        })
    };
    let on_remove = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.remove_combo(index))
    };

    html! {
        <div class="combo">
            <header>
                <span>{format!("Связка {}", index + 1)}</span>
                <button class="ghost" onclick={on_remove}>{"Удалить"}</button>
            </header>
            <ul class="combo-elements">
                {for combo.elements.iter().enumerate().map(|(position, id)| {
                    let name = elements
                        .iter()
                        .find(|element| element.id == *id)
                        .map_or_else(|| format!("#{id}"), |element| element.name.clone());
                    let on_remove_element = {
                        let session = session.clone();
                        Callback::from(move |_: MouseEvent| session.remove_element(index, position))
                    };
                    html! {
                        <li>
                            <span>{name}</span>
                            <button class="ghost" aria-label="Убрать элемент" onclick={on_remove_element}>{"✕"}</button>
                        </li>
                    }
                })}
            </ul>
            <select onchange={on_pick}>
                <option value="" selected=true>{"Добавить элемент…"}</option>
                {for elements.iter().map(|element| html! {
                    <option value={element.id.to_string()}>
                        {format!("{} · ур. {} · {}", element.name, element.level, format_score(element.score))}
                    </option>
                })}
            </select>
        </div>
    }
}
