//! # Demo backend
//!
//! [`DemoBackend`] answers the three API operations in-process, after a fixed
//! delay, from a seeded mission list. It speaks the same wire format as the
//! remote worker (query parameters in, `callback(<json>)` out), so the rest of
//! the client cannot tell the difference.
//!
//! | `type` | Behaviour |
//! |--------|-----------|
//! | `loginpresta` | Accepts any non-empty email and password. |
//! | `getmissions` | Returns the current mission list. |
//! | `updatemission` | Sets `statut` on the mission with `mission_id`; fails for unknown ids. |
//!
//! Anything else is answered with HTTP 400.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use reqwest::Url;
use serde_json::{json, Value};
use store::{Mission, MissionStatus};
use tracing::debug;

use crate::error::ApiError;
use crate::timer;
use crate::transport::Transport;

/// Simulated API. Clones share the mission list.
#[derive(Clone, Debug)]
pub struct DemoBackend {
    missions: Rc<RefCell<Vec<Mission>>>,
    delay: Duration,
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::with_missions(seed_missions())
    }
}

impl DemoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missions(missions: Vec<Mission>) -> Self {
        Self {
            missions: Rc::new(RefCell::new(missions)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn missions(&self) -> Vec<Mission> {
        self.missions.borrow().clone()
    }

    fn answer(&self, params: &HashMap<String, String>) -> Result<Value, ApiError> {
        match param(params, "type") {
            "loginpresta" => {
                if param(params, "email").is_empty() || param(params, "password").is_empty() {
                    Ok(json!({"success": false, "message": "Identifiants invalides"}))
                } else {
                    Ok(json!({"success": true, "prenom": "Camille", "nom": "Martin"}))
                }
            }
            "getmissions" => Ok(json!({"success": true, "missions": self.missions()})),
            "updatemission" => {
                let id = param(params, "mission_id").parse::<i64>().ok();
                let status = MissionStatus::from(param(params, "statut").to_string());
                let mut missions = self.missions.borrow_mut();
                let target = missions.iter_mut().find(|m| Some(m.id) == id);
                match target {
                    Some(mission) => {
                        mission.status = Some(status);
                        Ok(json!({"success": true}))
                    }
                    None => Ok(json!({"success": false, "message": "Mission introuvable"})),
                }
            }
            _ => Err(ApiError::Status(400)),
        }
    }
}

impl Transport for DemoBackend {
    async fn fetch(&self, url: Url) -> Result<String, ApiError> {
        if !self.delay.is_zero() {
            timer::sleep(self.delay).await;
        }

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        debug!("Demo backend answering {}", param(&params, "type"));
        let payload = self.answer(&params)?.to_string();

        Ok(match params.get("callback") {
            Some(callback) => format!("{callback}({payload});"),
            None => payload,
        })
    }
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}

fn seed_missions() -> Vec<Mission> {
    vec![
        Mission {
            client: Some("Mme Lefèvre".to_string()),
            address: Some("14 rue des Tilleuls, Lyon".to_string()),
            date: Some("2024-06-12".to_string()),
            time: Some("09:00".to_string()),
            description: Some("Aide au ménage et courses".to_string()),
            phone: Some("04 72 00 00 01".to_string()),
            priority: Some("normale".to_string()),
            ..Mission::new(101, "Aide à domicile").with_status(MissionStatus::Planned)
        },
        Mission {
            client: Some("M. Garnier".to_string()),
            address: Some("3 place Bellecour, Lyon".to_string()),
            date: Some("2024-06-12".to_string()),
            time: Some("14:30".to_string()),
            priority: Some("haute".to_string()),
            ..Mission::new(102, "Accompagnement médical").with_status(MissionStatus::InProgress)
        },
        Mission {
            client: Some("Mme Roux".to_string()),
            date: Some("2024-06-10".to_string()),
            ..Mission::new(103, "Préparation des repas").with_status(MissionStatus::Completed)
        },
    ]
}
