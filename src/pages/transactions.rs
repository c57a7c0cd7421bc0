use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api;
use crate::format::signed_rupees;
use crate::models::{Category, Transaction, TransactionFilter, TransactionPayload, TxKind};
use crate::pages::{alert, confirm};

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let transactions = use_state(Vec::<Transaction>::new);
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let filter_category = use_state(|| "".to_string());
    let filter_kind = use_state(|| "".to_string());
    let start_date = use_state(|| "".to_string());
    let end_date = use_state(|| "".to_string());

    // One row at a time may be in edit mode, keyed by (id, kind) since the
    // merged list can repeat ids across incomes and expenses.
    let editing = use_state(|| None::<(i64, TxKind)>);
    let edit_amount = use_state(|| "".to_string());
    let edit_category = use_state(|| "".to_string());
    let edit_date = use_state(|| "".to_string());
    let edit_description = use_state(|| "".to_string());

    {
        let transactions = transactions.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::transactions::list(&TransactionFilter::default()).await {
                        Ok(list) => transactions.set(list),
                        Err(err) => error.set(Some(err.message("Failed to load transactions"))),
                    }
                    if let Ok(list) = api::categories::list().await {
                        categories.set(list);
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let apply_filters = {
        let transactions = transactions.clone();
        let loading = loading.clone();
        let error = error.clone();
        let filter_category = filter_category.clone();
        let filter_kind = filter_kind.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        Callback::from(move |_| {
            let filter = TransactionFilter {
                category: (*filter_category).clone(),
                kind: (*filter_kind).clone(),
                start_date: (*start_date).clone(),
                end_date: (*end_date).clone(),
            };
            let transactions = transactions.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            spawn_local(async move {
                match api::transactions::list(&filter).await {
                    Ok(list) => {
                        error.set(None);
                        transactions.set(list);
                    }
                    Err(err) => error.set(Some(err.message("Failed to filter transactions"))),
                }
                loading.set(false);
            });
        })
    };

    let clear_filters = {
        let transactions = transactions.clone();
        let loading = loading.clone();
        let error = error.clone();
        let filter_category = filter_category.clone();
        let filter_kind = filter_kind.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        Callback::from(move |_| {
            filter_category.set("".to_string());
            filter_kind.set("".to_string());
            start_date.set("".to_string());
            end_date.set("".to_string());
            let transactions = transactions.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            spawn_local(async move {
                match api::transactions::list(&TransactionFilter::default()).await {
                    Ok(list) => {
                        error.set(None);
                        transactions.set(list);
                    }
                    Err(err) => error.set(Some(err.message("Failed to load transactions"))),
                }
                loading.set(false);
            });
        })
    };

    let on_delete = {
        let transactions = transactions.clone();
        Callback::from(move |(id, kind): (i64, TxKind)| {
            if !confirm("Are you sure you want to delete this transaction?") {
                return;
            }
            let transactions = transactions.clone();
            spawn_local(async move {
                let result = match kind {
                    TxKind::Income => api::incomes::delete(id).await,
                    TxKind::Expense => api::expenses::delete(id).await,
                };
                match result {
                    Ok(()) => {
                        let next = (*transactions)
                            .iter()
                            .filter(|t| !(t.id == id && t.kind == kind))
                            .cloned()
                            .collect();
                        transactions.set(next);
                    }
                    Err(_) => alert("Failed to delete transaction"),
                }
            });
        })
    };

    let start_edit = {
        let editing = editing.clone();
        let edit_amount = edit_amount.clone();
        let edit_category = edit_category.clone();
        let edit_date = edit_date.clone();
        let edit_description = edit_description.clone();
        Callback::from(move |tx: Transaction| {
            editing.set(Some((tx.id, tx.kind)));
            edit_amount.set(format!("{:.2}", tx.amount));
            edit_category.set(tx.category.clone().unwrap_or_default());
            edit_date.set(tx.date.clone());
            edit_description.set(tx.description.clone());
        })
    };

    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let save_edit = {
        let editing = editing.clone();
        let edit_amount = edit_amount.clone();
        let edit_category = edit_category.clone();
        let edit_date = edit_date.clone();
        let edit_description = edit_description.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        Callback::from(move |_| {
            let Some((id, kind)) = *editing else { return };
            let Ok(amount) = edit_amount.trim().parse::<f64>() else {
                alert("Enter a valid amount");
                return;
            };
            let payload = TransactionPayload {
                amount,
                category: if edit_category.is_empty() {
                    None
                } else {
                    Some((*edit_category).clone())
                },
                date: (*edit_date).clone(),
                description: (*edit_description).clone(),
            };
            let editing = editing.clone();
            let transactions = transactions.clone();
            let loading = loading.clone();
            spawn_local(async move {
                let result = match kind {
                    TxKind::Income => api::incomes::update(id, &payload).await,
                    TxKind::Expense => api::expenses::update(id, &payload).await,
                };
                match result {
                    Ok(_) => {
                        editing.set(None);
                        loading.set(true);
                        match api::transactions::list(&TransactionFilter::default()).await {
                            Ok(list) => transactions.set(list),
                            Err(_) => alert("Failed to reload transactions"),
                        }
                        loading.set(false);
                    }
                    Err(err) => alert(&err.message("Failed to update transaction")),
                }
            });
        })
    };

    if *loading {
        return html! { <div class="loading">{"Loading..."}</div> };
    }

    html! {
        <>
            <h2>{"All Transactions"}</h2>

            if let Some(msg) = &*error {
                <div class="error-message">{ msg.clone() }</div>
            }

            <div class="filters">
                <div class="filter-row">
                    <div class="filter-group">
                        <label>{"Category"}</label>
                        <select onchange={{
                            let filter_category = filter_category.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                filter_category.set(select.value());
                            })
                        }}>
                            <option value="" selected={filter_category.is_empty()}>{"All Categories"}</option>
                            { for categories.iter().map(|cat| html! {
                                <option value={cat.name.clone()} selected={*filter_category == cat.name}>
                                    { cat.name.clone() }
                                </option>
                            }) }
                        </select>
                    </div>

                    <div class="filter-group">
                        <label>{"Type"}</label>
                        <select onchange={{
                            let filter_kind = filter_kind.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                filter_kind.set(select.value());
                            })
                        }}>
                            <option value="" selected={filter_kind.is_empty()}>{"All"}</option>
                            <option value="income" selected={*filter_kind == "income"}>{"Income"}</option>
                            <option value="expense" selected={*filter_kind == "expense"}>{"Expense"}</option>
                        </select>
                    </div>

                    <div class="filter-group">
                        <label>{"Start Date"}</label>
                        <input type="date" value={(*start_date).clone()} oninput={{
                            let start_date = start_date.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                start_date.set(input.value());
                            })
                        }} />
                    </div>

                    <div class="filter-group">
                        <label>{"End Date"}</label>
                        <input type="date" value={(*end_date).clone()} oninput={{
                            let end_date = end_date.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                end_date.set(input.value());
                            })
                        }} />
                    </div>

                    <div class="filter-buttons">
                        <button onclick={apply_filters} class="btn-primary">{"Filter"}</button>
                        <button onclick={clear_filters} class="btn-secondary">{"Clear"}</button>
                    </div>
                </div>
            </div>

            { if transactions.is_empty() {
                html! { <p class="no-data">{"No transactions found"}</p> }
            } else {
                html! {
                    <div class="transactions-table">
                        <table>
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Type"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Description"}</th>
                                    <th>{"Amount"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for transactions.iter().map(|tx| {
                                    if *editing == Some((tx.id, tx.kind)) {
                                        edit_row(
                                            tx,
                                            &categories,
                                            &edit_amount,
                                            &edit_category,
                                            &edit_date,
                                            &edit_description,
                                            &save_edit,
                                            &cancel_edit,
                                        )
                                    } else {
                                        display_row(tx, &start_edit, &on_delete)
                                    }
                                }) }
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </>
    }
}

fn display_row(
    tx: &Transaction,
    start_edit: &Callback<Transaction>,
    on_delete: &Callback<(i64, TxKind)>,
) -> Html {
    let edit = {
        let start_edit = start_edit.clone();
        let tx = tx.clone();
        Callback::from(move |_| start_edit.emit(tx.clone()))
    };
    let delete = {
        let on_delete = on_delete.clone();
        let key = (tx.id, tx.kind);
        Callback::from(move |_| on_delete.emit(key))
    };

    let modified = tx
        .updated_at
        .clone()
        .or_else(|| tx.created_at.clone())
        .unwrap_or_default();

    html! {
        <tr key={format!("{}-{}", tx.kind.as_str(), tx.id)}>
            <td title={modified}>{ tx.date.clone() }</td>
            <td class={tx.kind.as_str()}>{ tx.kind.as_str() }</td>
            <td>{ tx.category.clone().unwrap_or_else(|| "-".to_string()) }</td>
            <td>{ if tx.description.is_empty() { "-".to_string() } else { tx.description.clone() } }</td>
            <td class={format!("amount {}", tx.kind.as_str())}>
                { signed_rupees(tx.kind, tx.amount) }
            </td>
            <td>
                <button onclick={edit} class="btn-small btn-edit">{"Edit"}</button>
                <button onclick={delete} class="btn-small btn-delete">{"Delete"}</button>
            </td>
        </tr>
    }
}

#[allow(clippy::too_many_arguments)]
fn edit_row(
    tx: &Transaction,
    categories: &[Category],
    edit_amount: &UseStateHandle<String>,
    edit_category: &UseStateHandle<String>,
    edit_date: &UseStateHandle<String>,
    edit_description: &UseStateHandle<String>,
    save_edit: &Callback<MouseEvent>,
    cancel_edit: &Callback<MouseEvent>,
) -> Html {
    html! {
        <tr key={format!("{}-{}", tx.kind.as_str(), tx.id)}>
            <td>
                <input type="date" value={(**edit_date).clone()} oninput={{
                    let edit_date = edit_date.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        edit_date.set(input.value());
                    })
                }} />
            </td>
            <td class={tx.kind.as_str()}>{ tx.kind.as_str() }</td>
            <td>
                <select onchange={{
                    let edit_category = edit_category.clone();
                    Callback::from(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        edit_category.set(select.value());
                    })
                }}>
                    <option value="" selected={edit_category.is_empty()}>{"None"}</option>
                    { for categories
                        .iter()
                        .filter(|c| c.category_type == tx.kind)
                        .map(|cat| html! {
                            <option value={cat.name.clone()} selected={**edit_category == cat.name}>
                                { cat.name.clone() }
                            </option>
                        }) }
                </select>
            </td>
            <td>
                <input type="text" value={(**edit_description).clone()} oninput={{
                    let edit_description = edit_description.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        edit_description.set(input.value());
                    })
                }} />
            </td>
            <td>
                <input type="number" step="0.01" value={(**edit_amount).clone()} oninput={{
                    let edit_amount = edit_amount.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        edit_amount.set(input.value());
                    })
                }} />
            </td>
            <td>
                <button onclick={save_edit.clone()} class="btn-small btn-save">{"Save"}</button>
                <button onclick={cancel_edit.clone()} class="btn-small btn-cancel">{"Cancel"}</button>
            </td>
        </tr>
    }
}
