//! # Application controller
//!
//! [`Controller`] owns the application state and sequences every user-visible
//! flow: session restore, login, mission load and refresh, status updates and
//! logout. It reaches the remote API through [`MissionsClient`], persistent
//! storage through [`SessionStore`], and the page through [`View`].
//!
//! ## Phases
//!
//! ```text
//! Anonymous ──submit──▶ Authenticating ──success──▶ Loading ──answer──▶ Ready
//!     ▲                      │                        ▲                  │
//!     └───────failure────────┘                        └──update ok───────┘
//! any phase ──logout──▶ Anonymous
//! ```
//!
//! Restoring a stored session on start jumps straight to `Loading`; the stored
//! identity is not re-checked with the server.
//!
//! ## Ordering
//!
//! All methods take `&self`; state sits in a `RefCell` that is never held
//! across an `.await`. Each mission load takes a sequence number and only the
//! latest load may apply its answer. Logout advances both the load sequence and
//! the session epoch, so answers to requests made before it are dropped.

use std::cell::RefCell;

use api::{MissionsClient, MissionsReply, Transport};
use store::{KeyValueStore, Mission, MissionStatus, Session, SessionStore};
use tracing::{debug, error, info, warn};

use crate::board::MissionBoard;
use crate::notice::Notice;
use crate::view::View;

pub const MSG_FIELDS_REQUIRED: &str = "Veuillez remplir tous les champs";
pub const MSG_LOGIN_FAILED: &str = "Échec de la connexion. Vérifiez vos identifiants.";
pub const MSG_SERVER_UNREACHABLE: &str = "Impossible de joindre le serveur";
pub const MSG_NOT_LOGGED_IN: &str = "Veuillez vous connecter d'abord";
pub const MSG_LOAD_FAILED: &str = "Erreur lors du chargement des missions";
pub const MSG_NO_MISSIONS: &str = "Aucune mission disponible";
pub const MSG_REFRESHING: &str = "Actualisation des missions...";
pub const MSG_UPDATING: &str = "Mise à jour de la mission...";
pub const MSG_UPDATED: &str = "Mission mise à jour avec succès";
pub const MSG_UPDATE_FAILED: &str = "Erreur lors de la mise à jour";
pub const MSG_LOGGED_OUT: &str = "Déconnexion réussie";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Anonymous,
    Authenticating,
    Loading,
    Ready,
}

#[derive(Debug, Default)]
struct AppState {
    phase: Phase,
    session: Option<Session>,
    missions: Vec<Mission>,
    load_seq: u64,
    epoch: u64,
}

pub struct Controller<T, S, V> {
    client: MissionsClient<T>,
    sessions: SessionStore<S>,
    view: V,
    state: RefCell<AppState>,
}

impl<T: Transport, S: KeyValueStore, V: View> Controller<T, S, V> {
    pub fn new(client: MissionsClient<T>, sessions: SessionStore<S>, view: V) -> Self {
        Self {
            client,
            sessions,
            view,
            state: RefCell::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn missions(&self) -> Vec<Mission> {
        self.state.borrow().missions.clone()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn client(&self) -> &MissionsClient<T> {
        &self.client
    }

    /// Restore a stored session, if any, and load its missions.
    pub async fn init(&self) {
        let Some(session) = self.sessions.restore() else {
            debug!("No stored session");
            self.view.show_login();
            return;
        };

        info!("Automatic reconnection for {}", session.email);
        self.state.borrow_mut().session = Some(session.clone());
        self.view.show_missions_section(&session);
        self.view.notify(Notice::success(format!(
            "Reconnexion automatique - Bienvenue {}",
            session.display_name()
        )));
        self.load_missions().await;
    }

    pub async fn submit_login(&self, email: &str, password: &str) {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            self.view.notify(Notice::error(MSG_FIELDS_REQUIRED));
            return;
        }

        let epoch = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Anonymous {
                debug!("Ignoring login submit in phase {:?}", state.phase);
                return;
            }
            state.phase = Phase::Authenticating;
            state.epoch
        };

        info!("Login attempt for {email}");
        self.view.set_login_pending(true);
        let result = self.client.login(email, password).await;

        if self.state.borrow().epoch != epoch {
            debug!("Dropping login answer from before logout");
            return;
        }
        self.view.set_login_pending(false);

        match result {
            Ok(reply) if reply.success => {
                let session = Session::new(
                    email,
                    reply.given_name.unwrap_or_default(),
                    reply.family_name.unwrap_or_default(),
                );
                info!("Logged in as {}", session.email);

                // 1. Persist
                self.sessions.save(&session);
                self.state.borrow_mut().session = Some(session.clone());

                // 2. Swap sections
                self.view.show_missions_section(&session);
                self.view.notify(Notice::success(format!(
                    "Connexion réussie - Bienvenue {}",
                    session.display_name()
                )));

                // 3. Fetch
                self.load_missions().await;
            }
            Ok(reply) => {
                info!("Login refused for {email}");
                self.fail_login(reply.message.unwrap_or_else(|| MSG_LOGIN_FAILED.to_string()));
            }
            Err(e) => {
                warn!("Login request failed: {e}");
                self.fail_login(MSG_SERVER_UNREACHABLE);
            }
        }
    }

    fn fail_login(&self, message: impl Into<String>) {
        {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Anonymous;
            state.session = None;
        }
        self.sessions.clear();
        self.view.notify(Notice::error(message));
    }

    /// Fetch the mission list and replace what is shown.
    pub async fn load_missions(&self) {
        let email = self.state.borrow().session.as_ref().map(|s| s.email.clone());
        let Some(email) = email else {
            self.view.notify(Notice::error(MSG_NOT_LOGGED_IN));
            return;
        };

        if !self.view.has_mission_surface() {
            error!("Mission containers are missing, cannot show missions");
            self.view.notify(Notice::error(MSG_LOAD_FAILED));
            return;
        }

        let seq = {
            let mut state = self.state.borrow_mut();
            state.load_seq += 1;
            state.phase = Phase::Loading;
            state.load_seq
        };
        debug!("Loading missions (#{seq})");
        self.view.show_mission_loader();

        let result = self.client.missions(&email).await;

        if self.state.borrow().load_seq != seq {
            debug!("Dropping superseded missions answer (#{seq})");
            return;
        }

        let (missions, notice) = match result {
            Ok(MissionsReply {
                success: true,
                missions: Some(missions),
                ..
            }) => {
                let count = missions.len();
                (missions, Notice::success(format!("{count} mission(s) chargée(s)")))
            }
            Ok(_) => {
                debug!("No missions in answer");
                (Vec::new(), Notice::info(MSG_NO_MISSIONS))
            }
            Err(e) => {
                warn!("Missions request failed: {e}");
                (Vec::new(), Notice::error(MSG_LOAD_FAILED))
            }
        };

        self.view.render_missions(MissionBoard::from_missions(&missions));
        {
            let mut state = self.state.borrow_mut();
            state.missions = missions;
            state.phase = Phase::Ready;
        }
        self.view.notify(notice);
    }

    pub async fn refresh_missions(&self) {
        self.view.notify(Notice::info(MSG_REFRESHING));
        self.load_missions().await;
    }

    /// Ask the server to move a mission to `status`, then reload on success.
    pub async fn update_status(&self, mission_id: i64, status: MissionStatus) {
        let (email, epoch) = {
            let state = self.state.borrow();
            (state.session.as_ref().map(|s| s.email.clone()), state.epoch)
        };
        let Some(email) = email else {
            self.view.notify(Notice::error(MSG_NOT_LOGGED_IN));
            return;
        };

        info!("Updating mission {mission_id} to {status}");
        self.view.notify(Notice::info(MSG_UPDATING));
        let result = self.client.update_mission(mission_id, &status, &email).await;

        if self.state.borrow().epoch != epoch {
            debug!("Dropping update answer from before logout");
            return;
        }

        match result {
            Ok(reply) if reply.success => {
                self.view.notify(Notice::success(MSG_UPDATED));
                self.load_missions().await;
            }
            Ok(reply) => {
                warn!(
                    "Mission {mission_id} update refused: {}",
                    reply.message.as_deref().unwrap_or("no message")
                );
                self.view.notify(Notice::error(MSG_UPDATE_FAILED));
            }
            Err(e) => {
                warn!("Mission {mission_id} update failed: {e}");
                self.view.notify(Notice::error(MSG_UPDATE_FAILED));
            }
        }
    }

    pub fn logout(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Anonymous;
            state.session = None;
            state.missions.clear();
            state.epoch += 1;
            state.load_seq += 1;
        }
        self.sessions.clear();

        self.view.set_login_pending(false);
        self.view.render_missions(MissionBoard::Empty);
        self.view.reset_login_form();
        self.view.show_login();
        self.view.notify(Notice::success(MSG_LOGGED_OUT));
        info!("Logged out");
    }
}
