mod add_transaction;
mod categories;
mod dashboard;
mod login;
mod register;
mod transactions;

pub use add_transaction::AddTransactionPage;
pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use transactions::TransactionsPage;

use yew::prelude::*;

use crate::routes::Page;

const NAV_ITEMS: [(&str, Page); 5] = [
    ("Dashboard", Page::Dashboard),
    ("Transactions", Page::Transactions),
    ("Add Income", Page::AddIncome),
    ("Add Expense", Page::AddExpense),
    ("Categories", Page::Categories),
];

/// Header and nav wrapped around every private screen.
pub fn shell(
    active: Page,
    username: Option<String>,
    on_navigate: &Callback<Page>,
    on_logout: &Callback<()>,
    children: Html,
) -> Html {
    let logout = {
        let on_logout = on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <div class="dashboard">
            <header class="header">
                <h1>{"Clarity"}</h1>
                <div class="header-right">
                    if let Some(name) = username {
                        <span>{ format!("Welcome, {}", name) }</span>
                    }
                    <button onclick={logout} class="btn-logout">{"Logout"}</button>
                </div>
            </header>

            <nav class="nav">
                { for NAV_ITEMS.iter().map(|(label, page)| {
                    let on_navigate = on_navigate.clone();
                    let page = *page;
                    let class = if page == active { "nav-link active" } else { "nav-link" };
                    html! {
                        <button type="button" class={class} onclick={Callback::from(move |_| on_navigate.emit(page))}>
                            { *label }
                        </button>
                    }
                }) }
            </nav>

            <main class="main-content">
                { children }
            </main>
        </div>
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
