use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::routes::Page;
use crate::session::{self, Session};

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginProps) -> Html {
    let session_handle = use_context::<UseStateHandle<Session>>();
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let session_handle = session_handle.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let username_val = username.trim().to_string();
            let password_val = (*password).clone();

            if username_val.is_empty() || password_val.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            error.set(None);
            loading.set(true);

            let session_handle = session_handle.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match api::auth::login(&username_val, &password_val).await {
                    Ok(tokens) => {
                        session::save(&tokens.access, &tokens.refresh, &username_val);
                        if let Some(handle) = &session_handle {
                            handle.set(session::load());
                        }
                    }
                    Err(err) => error.set(Some(err.message("Login failed"))),
                }
                loading.set(false);
            });
        })
    };

    let to_register = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Register))
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"Clarity"}</h1>
                <h2>{"Login"}</h2>

                <form onsubmit={on_submit}>
                    if let Some(msg) = &*error {
                        <div class="error-message">{ msg.clone() }</div>
                    }

                    <div class="form-group">
                        <label>{"Email"}</label>
                        <input
                            type="email"
                            value={(*username).clone()}
                            oninput={{
                                let username = username.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    username.set(input.value());
                                })
                            }}
                            placeholder="Enter your email"
                        />
                    </div>

                    <div class="form-group">
                        <label>{"Password"}</label>
                        <input
                            type="password"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                            placeholder="Enter your password"
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled={*loading}>
                        { if *loading { "Logging in..." } else { "Login" } }
                    </button>
                </form>

                <p class="auth-switch">
                    {"No account?"}
                    <button type="button" class="btn-link" onclick={to_register}>{"Register"}</button>
                </p>
            </div>
        </div>
    }
}
