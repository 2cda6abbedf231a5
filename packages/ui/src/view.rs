//! The page as the controller sees it.
//!
//! [`View`] is the only way the [`crate::Controller`] touches the screen. The
//! running app implements it with Dioxus signals ([`crate::SignalView`]);
//! tests implement it with a recorder.

use store::Session;

use crate::board::MissionBoard;
use crate::notice::Notice;

pub trait View {
    /// Show the login section, hide the missions section and user info.
    fn show_login(&self);

    /// Show the missions section and the user's identity, hide the login section.
    fn show_missions_section(&self, session: &Session);

    /// Disable the submit control and relabel it while a login is in flight.
    fn set_login_pending(&self, pending: bool);

    fn reset_login_form(&self);

    fn show_mission_loader(&self);

    fn render_missions(&self, board: MissionBoard);

    fn notify(&self, notice: Notice);

    /// Whether there is somewhere to render missions.
    fn has_mission_surface(&self) -> bool {
        true
    }
}
