use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api;
use crate::models::{Category, TransactionPayload, TxKind};
use crate::routes::Page;

#[derive(Properties, PartialEq)]
pub struct AddTransactionProps {
    pub kind: TxKind,
    pub on_navigate: Callback<Page>,
}

fn today() -> String {
    let iso = js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default();
    iso.split('T').next().unwrap_or("").to_string()
}

/// Form-layer validation. The category must be one of the options loaded for
/// this screen's kind; a draft can otherwise hold a name that only exists in
/// the other variant's list.
fn build_payload(
    amount: &str,
    category: &str,
    date: &str,
    description: &str,
    categories: &[Category],
) -> Result<TransactionPayload, &'static str> {
    let Ok(amount) = amount.trim().parse::<f64>() else {
        return Err("Enter a valid amount");
    };
    if amount <= 0.0 {
        return Err("Amount must be greater than zero");
    }
    if date.is_empty() {
        return Err("Date is required");
    }
    let category = if category.is_empty() {
        None
    } else if categories.iter().any(|c| c.name == category) {
        Some(category.to_string())
    } else {
        return Err("Choose a category from the list");
    };

    Ok(TransactionPayload {
        amount,
        category,
        date: date.to_string(),
        description: description.to_string(),
    })
}

#[function_component(AddTransactionPage)]
pub fn add_transaction_page(props: &AddTransactionProps) -> Html {
    let kind = props.kind;
    let amount = use_state(|| "".to_string());
    let category = use_state(|| "".to_string());
    let date = use_state(today);
    let description = use_state(|| "".to_string());
    let categories = use_state(Vec::<Category>::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    {
        let categories = categories.clone();
        use_effect_with_deps(
            move |kind| {
                let kind = *kind;
                spawn_local(async move {
                    match api::categories::list().await {
                        Ok(list) => categories.set(
                            list.into_iter()
                                .filter(|c| c.category_type == kind)
                                .collect(),
                        ),
                        Err(_) => log::warn!("failed to load categories"),
                    }
                });
                || ()
            },
            kind,
        );
    }

    let on_submit = {
        let amount = amount.clone();
        let category = category.clone();
        let date = date.clone();
        let description = description.clone();
        let categories = categories.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let payload = match build_payload(&amount, &category, &date, &description, &categories)
            {
                Ok(payload) => payload,
                Err(msg) => {
                    error.set(Some(msg.to_string()));
                    return;
                }
            };

            error.set(None);
            loading.set(true);

            let error = error.clone();
            let loading = loading.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                let result = match kind {
                    TxKind::Income => api::incomes::create(&payload).await,
                    TxKind::Expense => api::expenses::create(&payload).await,
                };
                match result {
                    Ok(_) => on_navigate.emit(Page::Transactions),
                    Err(err) => error.set(Some(err.message("Failed to add transaction"))),
                }
                loading.set(false);
            });
        })
    };

    let on_cancel = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Transactions))
    };

    let to_categories = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Categories))
    };

    html! {
        <>
            <h2>{ format!("Add {}", kind.label()) }</h2>

            <div class="form-container">
                <form onsubmit={on_submit}>
                    if let Some(msg) = &*error {
                        <div class="error-message">{ msg.clone() }</div>
                    }

                    <div class="form-group">
                        <label>{"Amount (Rs.)"}</label>
                        <input
                            type="number"
                            step="0.01"
                            min="0.01"
                            value={(*amount).clone()}
                            oninput={{
                                let amount = amount.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    amount.set(input.value());
                                })
                            }}
                            placeholder="Enter amount"
                            required={true}
                        />
                    </div>

                    <div class="form-group">
                        <label>{"Category"}</label>
                        <select onchange={{
                            let category = category.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                category.set(select.value());
                            })
                        }}>
                            <option value="" selected={category.is_empty()}>{"Select category (optional)"}</option>
                            { for categories.iter().map(|cat| html! {
                                <option value={cat.name.clone()} selected={*category == cat.name}>
                                    { cat.name.clone() }
                                </option>
                            }) }
                        </select>
                        <small>
                            {"Don't see your category? "}
                            <button type="button" class="btn-link" onclick={to_categories}>{"Add one"}</button>
                        </small>
                    </div>

                    <div class="form-group">
                        <label>{"Date"}</label>
                        <input
                            type="date"
                            value={(*date).clone()}
                            oninput={{
                                let date = date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    date.set(input.value());
                                })
                            }}
                            required={true}
                        />
                    </div>

                    <div class="form-group">
                        <label>{"Description"}</label>
                        <input
                            type="text"
                            value={(*description).clone()}
                            oninput={{
                                let description = description.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    description.set(input.value());
                                })
                            }}
                            placeholder="Enter description (optional)"
                            maxlength="500"
                        />
                    </div>

                    <div class="form-actions">
                        <button type="submit" disabled={*loading} class={format!("btn-primary {}", kind.as_str())}>
                            { if *loading { "Adding...".to_string() } else { format!("Add {}", kind.label()) } }
                        </button>
                        <button type="button" onclick={on_cancel} class="btn-secondary">
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, kind: TxKind) -> Category {
        Category {
            id: 1,
            name: name.to_string(),
            category_type: kind,
            is_default: false,
        }
    }

    #[test]
    fn valid_drafts_build_a_payload() {
        let cats = vec![category("Food", TxKind::Expense)];
        let payload = build_payload("250.00", "Food", "2024-03-01", "Groceries", &cats).unwrap();
        assert_eq!(payload.amount, 250.0);
        assert_eq!(payload.category.as_deref(), Some("Food"));
        assert_eq!(payload.date, "2024-03-01");
    }

    #[test]
    fn category_is_optional() {
        let payload = build_payload("10", "", "2024-03-01", "", &[]).unwrap();
        assert!(payload.category.is_none());
    }

    #[test]
    fn invalid_amounts_and_dates_are_rejected() {
        assert_eq!(
            build_payload("abc", "", "2024-03-01", "", &[]),
            Err("Enter a valid amount")
        );
        assert_eq!(
            build_payload("0", "", "2024-03-01", "", &[]),
            Err("Amount must be greater than zero")
        );
        assert_eq!(build_payload("10", "", "", "", &[]), Err("Date is required"));
    }

    #[test]
    fn category_from_the_other_variant_is_rejected() {
        // The expense screen loads expense categories only; a draft left over
        // from the income form can still name an income category.
        let cats = vec![category("Food", TxKind::Expense)];
        assert_eq!(
            build_payload("10", "Salary", "2024-03-01", "", &cats),
            Err("Choose a category from the list")
        );
    }
}
