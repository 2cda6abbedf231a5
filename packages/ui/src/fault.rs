use std::fmt;

use dioxus::prelude::*;
use tracing::error;

use crate::notice::Notice;
use crate::shell::AppShell;
use crate::signal_view::use_app;
use crate::status_notice::StatusNotice;
use crate::view::View;

pub const MSG_FAULT: &str = "Une erreur est survenue";

/// Log every fault and show one generic error notice.
pub fn report_fault<V: View, E: fmt::Display>(view: &V, faults: impl IntoIterator<Item = E>) {
    for fault in faults {
        error!("Render fault: {fault}");
    }
    view.notify(Notice::error(MSG_FAULT));
}

/// [`AppShell`] behind an error boundary. A render fault is logged and shown
/// as an error notice; "Réessayer" clears it and renders the shell again.
#[component]
pub fn GuardedShell() -> Element {
    let mut attempts = use_signal(|| 0u32);
    tracing::trace!("Shell render attempt {}", attempts());

    rsx! {
        ErrorBoundary {
            handle_error: move |errors: ErrorContext| rsx! {
                FaultPanel { errors, onretry: move |_| attempts += 1 }
            },
            AppShell {}
        }
    }
}

#[component]
fn FaultPanel(errors: ErrorContext, onretry: EventHandler<()>) -> Element {
    let app = use_app();
    let report = errors.clone();
    use_effect(move || report_fault(&app.view(), report.errors().iter()));

    rsx! {
        main {
            class: "app",
            div {
                class: "fault",
                p { "{MSG_FAULT}" }
                button {
                    class: "btn-retry",
                    onclick: move |_| {
                        errors.clear_errors();
                        onretry.call(());
                    },
                    "Réessayer"
                }
            }
            StatusNotice {}
        }
    }
}
