use dioxus::prelude::*;

use crate::signal_view::use_app;

/// The single transient notice. Hidden by its own timer, see [`crate::NoticeBoard`].
#[component]
pub fn StatusNotice() -> Element {
    let notices = use_app().view().notices;
    let board = notices();
    let message = board.current().map(|n| n.message.clone()).unwrap_or_default();

    rsx! {
        div {
            id: "status-message",
            class: board.css_class(),
            role: "status",
            "{message}"
        }
    }
}
