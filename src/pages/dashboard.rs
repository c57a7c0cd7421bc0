use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::format::{balance_class, rupees, signed_rupees};
use crate::models::DashboardData;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let data = use_state(|| None::<DashboardData>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let data = data.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    // Empty dates: the backend aggregates the current month.
                    match api::dashboard::get("", "").await {
                        Ok(payload) => data.set(Some(payload)),
                        Err(err) => error.set(Some(err.message("Failed to load dashboard"))),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    if *loading {
        return html! { <div class="loading">{"Loading..."}</div> };
    }
    if let Some(msg) = &*error {
        return html! { <div class="error-message">{ msg.clone() }</div> };
    }
    let Some(data) = &*data else {
        return html! {};
    };

    html! {
        <>
            <h2>{"Spending Overview"}</h2>
            <p class="period">
                { format!("{} to {}", data.period.start_date, data.period.end_date) }
            </p>

            <div class="summary-cards">
                <div class="card income-card">
                    <h3>{"Total Income"}</h3>
                    <p class="amount">{ rupees(data.summary.total_income) }</p>
                </div>
                <div class="card expense-card">
                    <h3>{"Total Expenses"}</h3>
                    <p class="amount">{ rupees(data.summary.total_expense) }</p>
                </div>
                <div class={format!("card balance-card {}", balance_class(data.summary.balance))}>
                    <h3>{"Balance"}</h3>
                    <p class="amount">{ rupees(data.summary.balance) }</p>
                </div>
            </div>

            <div class="dashboard-grid">
                <div class="category-breakdown">
                    <h3>{"Expenses by Category"}</h3>
                    { if data.expense_by_category.is_empty() {
                        html! { <p class="no-data">{"No expenses yet"}</p> }
                    } else {
                        html! {
                            <ul class="category-list">
                                { for data.expense_by_category.iter().map(|item| html! {
                                    <li>
                                        <span class="category-name">{ item.category.clone() }</span>
                                        <span class="category-amount">{ rupees(item.total) }</span>
                                    </li>
                                }) }
                            </ul>
                        }
                    }}
                </div>

                <div class="category-breakdown">
                    <h3>{"Income by Category"}</h3>
                    { if data.income_by_category.is_empty() {
                        html! { <p class="no-data">{"No income yet"}</p> }
                    } else {
                        html! {
                            <ul class="category-list">
                                { for data.income_by_category.iter().map(|item| html! {
                                    <li>
                                        <span class="category-name">{ item.category.clone() }</span>
                                        <span class="category-amount">{ rupees(item.total) }</span>
                                    </li>
                                }) }
                            </ul>
                        }
                    }}
                </div>
            </div>

            <div class="recent-transactions">
                <h3>{"Recent Transactions"}</h3>
                { if data.recent_transactions.is_empty() {
                    html! { <p class="no-data">{"No transactions yet"}</p> }
                } else {
                    html! {
                        <ul class="transaction-list">
                            { for data.recent_transactions.iter().map(|item| {
                                let description = if item.description.is_empty() {
                                    "No description".to_string()
                                } else {
                                    item.description.clone()
                                };
                                let category = item
                                    .category
                                    .clone()
                                    .unwrap_or_else(|| "Uncategorized".to_string());
                                html! {
                                    <li class={format!("transaction-item {}", item.kind.as_str())}>
                                        <div class="transaction-info">
                                            <span class="transaction-desc">{ description }</span>
                                            <span class="transaction-category">{ category }</span>
                                        </div>
                                        <div class="transaction-details">
                                            <span class={format!("transaction-amount {}", item.kind.as_str())}>
                                                { signed_rupees(item.kind, item.amount) }
                                            </span>
                                            <span class="transaction-date">{ item.date.clone() }</span>
                                        </div>
                                    </li>
                                }
                            }) }
                        </ul>
                    }
                }}
            </div>
        </>
    }
}
