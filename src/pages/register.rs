use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::routes::Page;

#[derive(Properties, PartialEq)]
pub struct RegisterProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(RegisterPage)]
pub fn register_page(props: &RegisterProps) -> Html {
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let confirm_password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            if email_val.is_empty() || password_val.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            if password_val != *confirm_password {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            error.set(None);
            loading.set(true);

            let error = error.clone();
            let loading = loading.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                match api::auth::register(&email_val, &password_val).await {
                    Ok(()) => on_navigate.emit(Page::Login),
                    Err(err) => error.set(Some(err.message("Registration failed"))),
                }
                loading.set(false);
            });
        })
    };

    let to_login = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Login))
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"Clarity"}</h1>
                <h2>{"Register"}</h2>

                <form onsubmit={on_submit}>
                    if let Some(msg) = &*error {
                        <div class="error-message">{ msg.clone() }</div>
                    }

                    <div class="form-group">
                        <label>{"Email"}</label>
                        <input
                            type="email"
                            value={(*email).clone()}
                            oninput={{
                                let email = email.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    email.set(input.value());
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
                            placeholder="Choose a password"
                        />
                    </div>

                    <div class="form-group">
                        <label>{"Confirm Password"}</label>
                        <input
                            type="password"
                            value={(*confirm_password).clone()}
                            oninput={{
                                let confirm_password = confirm_password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    confirm_password.set(input.value());
                                })
                            }}
                            placeholder="Repeat the password"
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled={*loading}>
                        { if *loading { "Registering..." } else { "Register" } }
                    </button>
                </form>

                <p class="auth-switch">
                    {"Already have an account?"}
                    <button type="button" class="btn-link" onclick={to_login}>{"Login"}</button>
                </p>
            </div>
        </div>
    }
}
