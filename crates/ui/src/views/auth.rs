use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{RESET_SENT_NOTICE, login_error_message, reset_error_message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Forgot,
}

#[component]
pub fn AuthView(reset: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let gate = ctx.auth_gate();
    let min_password_len = gate.password_policy().min_len();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut mode = use_signal(|| AuthMode::Login);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<&'static str>);

    let on_login = {
        let gate = gate.clone();
        use_callback(move |()| {
            if busy() {
                return;
            }
            busy.set(true);
            error.set(None);
            let gate = gate.clone();
            let email_value = email();
            let password_value = password();
            spawn(async move {
                let result = gate.login(&email_value, &password_value).await;
                busy.set(false);
                match result {
                    Ok(_) => {
                        password.set(String::new());
                        navigator.replace(Route::Dashboard {});
                    }
                    Err(err) => error.set(Some(login_error_message(&err, min_password_len))),
                }
            });
        })
    };

    let on_reset = {
        let gate = gate.clone();
        use_callback(move |()| {
            if busy() {
                return;
            }
            busy.set(true);
            error.set(None);
            notice.set(None);
            let gate = gate.clone();
            let email_value = email();
            spawn(async move {
                let result = gate.request_password_reset(&email_value).await;
                busy.set(false);
                match result {
                    Ok(()) => {
                        notice.set(Some(RESET_SENT_NOTICE));
                        mode.set(AuthMode::Login);
                    }
                    Err(err) => error.set(Some(reset_error_message(&err).to_string())),
                }
            });
        })
    };

    let current_mode = mode();
    let is_busy = busy();

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { class: "auth-title", "Área de Membros" }
                p { class: "auth-subtitle", "Entre na sua área de membros" }

                if reset {
                    p { class: "banner banner-info",
                        "Senha redefinida? Entre com sua nova senha."
                    }
                }
                if let Some(message) = notice() {
                    p { class: "banner banner-info", "{message}" }
                }
                if let Some(message) = error() {
                    p { class: "banner banner-error", role: "alert", "{message}" }
                }

                form {
                    class: "auth-form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        match current_mode {
                            AuthMode::Login => on_login.call(()),
                            AuthMode::Forgot => on_reset.call(()),
                        }
                    },

                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        placeholder: "seu@email.com",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    if current_mode == AuthMode::Login {
                        label { r#for: "password", "Senha" }
                        input {
                            id: "password",
                            r#type: "password",
                            placeholder: "••••••",
                            autocomplete: "current-password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: is_busy,
                            if is_busy { "Entrando..." } else { "Entrar" }
                        }
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                error.set(None);
                                mode.set(AuthMode::Forgot);
                            },
                            "Esqueci minha senha"
                        }
                    } else {
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: is_busy,
                            if is_busy { "Enviando..." } else { "Enviar link de recuperação" }
                        }
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                error.set(None);
                                mode.set(AuthMode::Login);
                            },
                            "Voltar ao login"
                        }
                    }
                }
            }
        }
    }
}
