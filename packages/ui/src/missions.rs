use dioxus::prelude::*;
use store::Session;

use crate::board::{CardAction, MissionBoard, MissionCard, EMPTY_STATE};
use crate::signal_view::{use_app, BoardState};

#[component]
pub fn MissionsSection(session: Session) -> Element {
    let app = use_app();
    let board = app.view().board;
    let refresh = app.clone();
    let logout = app.clone();

    rsx! {
        section {
            id: "missions-section",
            class: "missions-section",
            header {
                class: "user-info",
                span { id: "user-name", "{session.display_name()}" }
                span { class: "user-email", "{session.email}" }
                div {
                    class: "user-actions",
                    button {
                        class: "btn-refresh",
                        onclick: move |_| refresh.refresh(),
                        "Actualiser"
                    }
                    button {
                        class: "btn-logout",
                        onclick: move |_| logout.logout(),
                        "Déconnexion"
                    }
                }
            }
            match board() {
                BoardState::Loading => rsx! {
                    div { class: "loading", "Chargement des missions..." }
                },
                BoardState::Ready(MissionBoard::Empty) => rsx! {
                    div { class: "empty-state", p { "{EMPTY_STATE}" } }
                },
                BoardState::Ready(MissionBoard::Grid(cards)) => rsx! {
                    div {
                        class: "missions-container",
                        for card in cards {
                            MissionCardView { key: "{card.id}", card }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn MissionCardView(card: MissionCard) -> Element {
    let id = card.id;

    rsx! {
        div {
            class: "mission-card",
            "data-mission-id": "{id}",
            h3 { "{card.title}" }
            div {
                class: "mission-info",
                for field in card.fields.iter() {
                    p {
                        strong { "{field.label}:" }
                        " "
                        if field.class.is_empty() {
                            "{field.value}"
                        } else {
                            span { class: "{field.class}", "{field.value}" }
                        }
                    }
                }
            }
            if !card.actions.is_empty() {
                div {
                    class: "mission-actions",
                    for action in card.actions.iter().cloned() {
                        ActionButton { mission_id: id, action }
                    }
                }
            }
        }
    }
}

#[component]
fn ActionButton(mission_id: i64, action: CardAction) -> Element {
    let app = use_app();
    let kind = action.kind;

    rsx! {
        button {
            class: kind.class(),
            onclick: move |_| app.update_status(mission_id, action.target.clone()),
            "{kind.label()}"
        }
    }
}
