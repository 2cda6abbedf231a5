use dioxus::prelude::*;

use crate::login::LoginSection;
use crate::missions::MissionsSection;
use crate::signal_view::{use_app, Screen};
use crate::status_notice::StatusNotice;

/// Shows exactly one of the login and missions sections, plus the notice.
#[component]
pub fn AppShell() -> Element {
    let screen = use_app().view().screen;

    rsx! {
        main {
            class: "app",
            match screen() {
                Screen::Login => rsx! { LoginSection {} },
                Screen::Missions(session) => rsx! { MissionsSection { session } },
            }
            StatusNotice {}
        }
    }
}
