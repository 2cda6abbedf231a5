//! Missions UI shared by the workspace front ends.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`controller`] | [`Controller`]: login, restore, mission load/refresh, status updates, logout |
//! | [`view`] | [`View`]: what the controller may do to the page |
//! | [`board`] | [`MissionBoard`]: mission cards and their actions, renderable as HTML |
//! | [`notice`] | [`NoticeBoard`]: the single transient status notice |
//! | [`signal_view`] | Dioxus signals behind [`View`], the [`AppProvider`] context and [`use_app`] |
//!
//! Components: [`GuardedShell`], [`AppShell`], [`LoginSection`], [`MissionsSection`], [`StatusNotice`].

use dioxus::prelude::*;

pub mod board;
pub mod controller;
pub mod notice;
pub mod signal_view;
pub mod view;

mod fault;
mod login;
mod missions;
mod shell;
mod status_notice;

pub use board::{ActionKind, CardAction, CardField, MissionBoard, MissionCard};
pub use controller::{Controller, Phase};
pub use fault::{GuardedShell, MSG_FAULT};
pub use login::LoginSection;
pub use missions::MissionsSection;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use shell::AppShell;
pub use signal_view::{use_app, AppHandle, AppProvider, BoardState, Screen, SignalView};
pub use status_notice::StatusNotice;
pub use view::View;

pub const MISSIONS_CSS: Asset = asset!("/assets/missions.css");
