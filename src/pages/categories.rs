use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api;
use crate::models::{Category, TxKind};
use crate::pages::{alert, confirm};

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let new_name = use_state(|| "".to_string());
    let new_kind = use_state(|| TxKind::Expense);
    let add_error = use_state(|| None::<String>);

    {
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::categories::list().await {
                        Ok(list) => categories.set(list),
                        Err(err) => error.set(Some(err.message("Failed to load categories"))),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let on_add = {
        let categories = categories.clone();
        let new_name = new_name.clone();
        let new_kind = new_kind.clone();
        let add_error = add_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            add_error.set(None);

            let name = new_name.trim().to_string();
            if name.is_empty() {
                add_error.set(Some("Category name is required".to_string()));
                return;
            }

            let kind = *new_kind;
            let categories = categories.clone();
            let new_name = new_name.clone();
            let add_error = add_error.clone();
            spawn_local(async move {
                match api::categories::create(&name, kind).await {
                    Ok(_) => {
                        new_name.set("".to_string());
                        match api::categories::list().await {
                            Ok(list) => categories.set(list),
                            Err(_) => log::warn!("failed to reload categories"),
                        }
                    }
                    Err(err) => add_error.set(Some(err.message("Failed to create category"))),
                }
            });
        })
    };

    let on_delete = {
        let categories = categories.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this category?") {
                return;
            }
            let categories = categories.clone();
            spawn_local(async move {
                match api::categories::delete(id).await {
                    Ok(()) => {
                        let next = (*categories)
                            .iter()
                            .filter(|c| c.id != id)
                            .cloned()
                            .collect();
                        categories.set(next);
                    }
                    // Default categories are server-protected; the list is
                    // left as-is when the delete is rejected.
                    Err(_) => alert("Failed to delete category"),
                }
            });
        })
    };

    if *loading {
        return html! { <div class="loading">{"Loading..."}</div> };
    }

    let income_categories: Vec<Category> = categories
        .iter()
        .filter(|c| c.category_type == TxKind::Income)
        .cloned()
        .collect();
    let expense_categories: Vec<Category> = categories
        .iter()
        .filter(|c| c.category_type == TxKind::Expense)
        .cloned()
        .collect();

    html! {
        <>
            <h2>{"Manage Categories"}</h2>

            if let Some(msg) = &*error {
                <div class="error-message">{ msg.clone() }</div>
            }

            <div class="add-category-form">
                <h3>{"Add New Category"}</h3>
                <form onsubmit={on_add}>
                    if let Some(msg) = &*add_error {
                        <div class="error-message">{ msg.clone() }</div>
                    }

                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Category Name"}</label>
                            <input
                                type="text"
                                value={(*new_name).clone()}
                                oninput={{
                                    let new_name = new_name.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        new_name.set(input.value());
                                    })
                                }}
                                placeholder="Enter category name"
                            />
                        </div>

                        <div class="form-group">
                            <label>{"Type"}</label>
                            <select onchange={{
                                let new_kind = new_kind.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    let kind = if select.value() == "income" {
                                        TxKind::Income
                                    } else {
                                        TxKind::Expense
                                    };
                                    new_kind.set(kind);
                                })
                            }}>
                                <option value="expense" selected={*new_kind == TxKind::Expense}>{"Expense"}</option>
                                <option value="income" selected={*new_kind == TxKind::Income}>{"Income"}</option>
                            </select>
                        </div>

                        <button type="submit" class="btn-primary">{"Add Category"}</button>
                    </div>
                </form>
            </div>

            <div class="categories-grid">
                { category_section("Income Categories", "No income categories", &income_categories, &on_delete) }
                { category_section("Expense Categories", "No expense categories", &expense_categories, &on_delete) }
            </div>
        </>
    }
}

fn category_section(
    title: &'static str,
    empty_text: &'static str,
    categories: &[Category],
    on_delete: &Callback<i64>,
) -> Html {
    html! {
        <div class="category-section">
            <h3>{ title }</h3>
            { if categories.is_empty() {
                html! { <p class="no-data">{ empty_text }</p> }
            } else {
                html! {
                    <ul class="category-list-manage">
                        { for categories.iter().map(|cat| {
                            let delete = {
                                let on_delete = on_delete.clone();
                                let id = cat.id;
                                Callback::from(move |_| on_delete.emit(id))
                            };
                            html! {
                                <li key={cat.id}>
                                    <span>{ cat.name.clone() }</span>
                                    // Seeded defaults never offer a delete control.
                                    if !cat.is_default {
                                        <button onclick={delete} class="btn-small btn-delete">
                                            {"Delete"}
                                        </button>
                                    }
                                </li>
                            }
                        }) }
                    </ul>
                }
            }}
        </div>
    }
}
