use yew::prelude::*;

use crate::models::TxKind;
use crate::pages::{
    shell, AddTransactionPage, CategoriesPage, DashboardPage, LoginPage, RegisterPage,
    TransactionsPage,
};
use crate::routes::{self, Page};
use crate::session::{self, Session};

#[function_component(App)]
pub fn app() -> Html {
    // The durable store is read once at startup; afterwards this handle
    // mirrors it for rendering. Login and logout write both.
    let session_handle = use_state(session::load);
    let active_page = use_state(|| Page::Dashboard);

    let on_navigate = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let on_logout = {
        let session_handle = session_handle.clone();
        let active_page = active_page.clone();
        Callback::from(move |_: ()| {
            session::clear();
            session_handle.set(Session::default());
            active_page.set(Page::Login);
        })
    };

    // Guard re-runs on every render, so a cleared session immediately
    // resolves any private page back to the login screen.
    let page = routes::resolve(*active_page, session_handle.is_authenticated());

    let content = match page {
        Page::Login => html! { <LoginPage on_navigate={on_navigate.clone()} /> },
        Page::Register => html! { <RegisterPage on_navigate={on_navigate.clone()} /> },
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Transactions => html! { <TransactionsPage /> },
        // Keyed per variant: switching between the two remounts the form,
        // so drafts from one kind never carry into the other.
        Page::AddIncome => {
            html! { <AddTransactionPage key="add-income" kind={TxKind::Income} on_navigate={on_navigate.clone()} /> }
        }
        Page::AddExpense => {
            html! { <AddTransactionPage key="add-expense" kind={TxKind::Expense} on_navigate={on_navigate.clone()} /> }
        }
        Page::Categories => html! { <CategoriesPage /> },
    };

    let body = if page.requires_session() {
        shell(
            page,
            session_handle.username.clone(),
            &on_navigate,
            &on_logout,
            content,
        )
    } else {
        content
    };

    html! {
        <ContextProvider<UseStateHandle<Session>> context={session_handle.clone()}>
            { body }
        </ContextProvider<UseStateHandle<Session>>>
    }
}
