//! # Mission board view model
//!
//! [`MissionBoard`] is what the missions section shows: either the empty state
//! or a grid of cards, never both. It is built from the missions in the order
//! the API returned them and carries everything the markup needs, so it can be
//! checked in tests without a rendering surface.
//!
//! Each [`MissionCard`] lists only the fields the mission actually has, in a
//! fixed order, and the actions its status allows:
//!
//! | Status | Actions |
//! |--------|---------|
//! | `planifiée` | Commencer (→ `en_cours`), Refuser (→ `annulée`) |
//! | `en_cours` | Terminer (→ `terminée`) |
//! | anything else | none |
//!
//! [`MissionBoard::to_html`] renders the same view model as escaped HTML.

use std::fmt::{self, Write};

use html_escaper::HtmlEscaper;
use store::{Mission, MissionStatus};

/// Title shown for a mission without one.
pub const UNTITLED: &str = "Mission sans titre";

pub const EMPTY_STATE: &str = "Aucune mission disponible pour le moment.";

/// Displays a string with HTML special characters escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(HtmlEscaper(f), "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MissionBoard {
    Empty,
    Grid(Vec<MissionCard>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MissionCard {
    pub id: i64,
    pub title: String,
    pub fields: Vec<CardField>,
    pub actions: Vec<CardAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
    /// Extra class on the value, set for the status only.
    pub class: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardAction {
    pub kind: ActionKind,
    pub target: MissionStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Start,
    Decline,
    Complete,
}

impl ActionKind {
    fn for_target(target: &MissionStatus) -> Option<Self> {
        match target {
            MissionStatus::InProgress => Some(Self::Start),
            MissionStatus::Cancelled => Some(Self::Decline),
            MissionStatus::Completed => Some(Self::Complete),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Commencer",
            Self::Decline => "Refuser",
            Self::Complete => "Terminer",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Start => "btn-accept",
            Self::Decline => "btn-decline",
            Self::Complete => "btn-complete",
        }
    }
}

impl MissionBoard {
    pub fn from_missions(missions: &[Mission]) -> Self {
        if missions.is_empty() {
            Self::Empty
        } else {
            Self::Grid(missions.iter().map(MissionCard::from_mission).collect())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn cards(&self) -> &[MissionCard] {
        match self {
            Self::Empty => &[],
            Self::Grid(cards) => cards,
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            Self::Empty => {
                let _ = write!(html, r#"<div class="empty-state"><p>{EMPTY_STATE}</p></div>"#);
            }
            Self::Grid(cards) => {
                html.push_str(r#"<div class="missions-container">"#);
                for card in cards {
                    card.write_html(&mut html);
                }
                html.push_str("</div>");
            }
        }
        html
    }
}

impl MissionCard {
    pub fn from_mission(mission: &Mission) -> Self {
        let title = if mission.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            mission.title.clone()
        };

        let status = mission.status.as_ref().map(|s| s.as_wire().to_string());
        let fields = [
            ("Client", &mission.client),
            ("Adresse", &mission.address),
            ("Date", &mission.date),
            ("Heure", &mission.time),
            ("Statut", &status),
            ("Description", &mission.description),
            ("Téléphone", &mission.phone),
            ("Priorité", &mission.priority),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            let value = value.as_ref()?;
            let class = if label == "Statut" {
                format!("status-{value}")
            } else {
                String::new()
            };
            Some(CardField {
                label,
                value: value.clone(),
                class,
            })
        })
        .collect();

        let actions = mission
            .status
            .as_ref()
            .map(|s| s.transitions())
            .unwrap_or_default()
            .iter()
            .filter_map(|target| {
                ActionKind::for_target(target).map(|kind| CardAction {
                    kind,
                    target: target.clone(),
                })
            })
            .collect();

        Self {
            id: mission.id,
            title,
            fields,
            actions,
        }
    }

    fn write_html(&self, html: &mut String) {
        let _ = write!(
            html,
            r#"<div class="mission-card" data-mission-id="{}"><h3>{}</h3><div class="mission-info">"#,
            self.id,
            Escaped(&self.title)
        );
        for field in &self.fields {
            if field.class.is_empty() {
                let _ = write!(
                    html,
                    "<p><strong>{}:</strong> {}</p>",
                    field.label,
                    Escaped(&field.value)
                );
            } else {
                let _ = write!(
                    html,
                    r#"<p><strong>{}:</strong> <span class="{}">{}</span></p>"#,
                    field.label,
                    Escaped(&field.class),
                    Escaped(&field.value)
                );
            }
        }
        html.push_str("</div>");
        if !self.actions.is_empty() {
            html.push_str(r#"<div class="mission-actions">"#);
            for action in &self.actions {
                let _ = write!(
                    html,
                    r#"<button class="{}" data-target="{}">{}</button>"#,
                    action.kind.class(),
                    Escaped(action.target.as_wire()),
                    action.kind.label()
                );
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
}
