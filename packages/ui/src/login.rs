use dioxus::prelude::*;

use crate::signal_view::use_app;

/// Email/password form. Submitting hands both fields to the controller, which
/// validates and trims them.
#[component]
pub fn LoginSection() -> Element {
    let app = use_app();
    let view = app.view();
    let mut email = view.email;
    let mut password = view.password;
    let pending = view.login_pending;

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        app.login(email(), password());
    };

    rsx! {
        section {
            id: "login-section",
            class: "login-section",
            h1 { "Viiveo" }
            p { class: "login-subtitle", "Espace prestataire" }
            form {
                id: "login-form",
                onsubmit: onsubmit,
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "password", "Mot de passe" }
                input {
                    id: "password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn-login",
                    disabled: pending(),
                    if pending() {
                        "Connexion..."
                    } else {
                        "Se connecter"
                    }
                }
            }
        }
    }
}
