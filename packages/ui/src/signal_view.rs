//! Dioxus side of the controller: signals behind [`View`], and the context
//! handle components use to trigger flows.

use std::rc::Rc;
use std::time::Duration;

use api::{Backend, MissionsClient};
use dioxus::prelude::*;
use store::{ClientConfig, MissionStatus, Session, SessionStore};

use crate::board::MissionBoard;
use crate::controller::Controller;
use crate::notice::{Notice, NoticeBoard};
use crate::view::View;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = store::FileStorage;

fn platform_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    return store::LocalStorage::new();
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    return store::MemoryStorage::new();
    #[cfg(not(target_arch = "wasm32"))]
    return store::FileStorage::default_location();
}

/// Which section is on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Screen {
    #[default]
    Login,
    Missions(Session),
}

#[derive(Clone, Debug, PartialEq)]
pub enum BoardState {
    Loading,
    Ready(MissionBoard),
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Ready(MissionBoard::Empty)
    }
}

#[derive(Clone, Copy)]
pub struct SignalView {
    pub screen: Signal<Screen>,
    pub login_pending: Signal<bool>,
    pub email: Signal<String>,
    pub password: Signal<String>,
    pub board: Signal<BoardState>,
    pub notices: Signal<NoticeBoard>,
    notice_duration: Duration,
}

/// Create the signals backing a [`SignalView`] in the current component.
pub fn use_signal_view(notice_duration: Duration) -> SignalView {
    SignalView {
        screen: use_signal(Screen::default),
        login_pending: use_signal(|| false),
        email: use_signal(String::new),
        password: use_signal(String::new),
        board: use_signal(BoardState::default),
        notices: use_signal(NoticeBoard::default),
        notice_duration,
    }
}

impl View for SignalView {
    fn show_login(&self) {
        let mut screen = self.screen;
        screen.set(Screen::Login);
    }

    fn show_missions_section(&self, session: &Session) {
        let mut screen = self.screen;
        screen.set(Screen::Missions(session.clone()));
    }

    fn set_login_pending(&self, pending: bool) {
        let mut login_pending = self.login_pending;
        login_pending.set(pending);
    }

    fn reset_login_form(&self) {
        let (mut email, mut password) = (self.email, self.password);
        email.set(String::new());
        password.set(String::new());
    }

    fn show_mission_loader(&self) {
        let mut board = self.board;
        board.set(BoardState::Loading);
    }

    fn render_missions(&self, missions: MissionBoard) {
        let mut board = self.board;
        board.set(BoardState::Ready(missions));
    }

    fn notify(&self, notice: Notice) {
        let mut notices = self.notices;
        let generation = notices.write().show(notice);
        let duration = self.notice_duration;
        spawn_forever(async move {
            api::timer::sleep(duration).await;
            notices.write().dismiss(generation);
        });
    }
}

pub type AppController = Controller<Backend, PlatformStorage, SignalView>;

/// Shared handle to the controller. Every flow runs as a task that outlives
/// the component that started it.
#[derive(Clone)]
pub struct AppHandle(Rc<AppController>);

impl AppHandle {
    pub fn new(config: &ClientConfig, view: SignalView) -> Self {
        let transport = Backend::from_config(&config.api);
        if transport.is_demo() {
            tracing::info!("Using the simulated API");
        }
        let client = MissionsClient::new(config.api.base_url.clone(), transport)
            .with_timeout(config.api.timeout());
        let sessions = SessionStore::new(platform_storage());
        Self(Rc::new(Controller::new(client, sessions, view)))
    }

    pub fn view(&self) -> SignalView {
        *self.0.view()
    }

    pub fn init(&self) {
        let controller = self.0.clone();
        spawn_forever(async move { controller.init().await });
    }

    pub fn login(&self, email: String, password: String) {
        let controller = self.0.clone();
        spawn_forever(async move { controller.submit_login(&email, &password).await });
    }

    pub fn refresh(&self) {
        let controller = self.0.clone();
        spawn_forever(async move { controller.refresh_missions().await });
    }

    pub fn update_status(&self, mission_id: i64, status: MissionStatus) {
        let controller = self.0.clone();
        spawn_forever(async move { controller.update_status(mission_id, status).await });
    }

    pub fn logout(&self) {
        self.0.logout();
    }
}

pub fn use_app() -> AppHandle {
    use_context::<AppHandle>()
}

/// Builds the controller once, provides it to descendants and runs the
/// startup restore.
#[component]
pub fn AppProvider(config: ClientConfig, children: Element) -> Element {
    let view = use_signal_view(config.notice.duration());
    let app = use_hook(|| {
        let app = AppHandle::new(&config, view);
        app.init();
        app
    });
    use_context_provider(|| app);

    rsx! {
        {children}
    }
}
