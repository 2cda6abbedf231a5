//! Transient status notices.
//!
//! [`NoticeBoard`] holds the one notice on screen. A newer notice replaces the
//! text of the current one immediately. Each notice gets a generation number,
//! and a dismiss timer only hides the notice it was started for, so an older
//! timer cannot hide a newer message.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn css(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    current: Option<Notice>,
    visible: bool,
    generation: u64,
}

impl NoticeBoard {
    /// Put `notice` on screen and return the generation its timer must present.
    pub fn show(&mut self, notice: Notice) -> u64 {
        self.generation += 1;
        self.current = Some(notice);
        self.visible = true;
        self.generation
    }

    /// Hide the notice if it is still the one shown at `generation`.
    pub fn dismiss(&mut self, generation: u64) {
        if generation == self.generation {
            self.visible = false;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// CSS classes for the notice element.
    pub fn css_class(&self) -> String {
        let kind = self.current.as_ref().map_or("info", |n| n.kind.css());
        if self.visible {
            format!("status-message {kind} show")
        } else {
            format!("status-message {kind}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_dismiss() {
        let mut board = NoticeBoard::default();
        assert!(board.current().is_none());
        assert!(!board.visible());

        let generation = board.show(Notice::success("Déconnexion réussie"));
        assert!(board.visible());
        assert_eq!(board.css_class(), "status-message success show");

        board.dismiss(generation);
        assert!(!board.visible());
        assert_eq!(board.css_class(), "status-message success");
        // Text stays until replaced
        assert_eq!(board.current().unwrap().message, "Déconnexion réussie");
    }

    #[test]
    fn test_newer_notice_replaces_text() {
        let mut board = NoticeBoard::default();
        board.show(Notice::info("Mise à jour de la mission..."));
        board.show(Notice::error("Erreur lors de la mise à jour"));

        let current = board.current().unwrap();
        assert_eq!(current.kind, NoticeKind::Error);
        assert_eq!(current.message, "Erreur lors de la mise à jour");
    }

    #[test]
    fn test_stale_timer_does_not_hide_newer_notice() {
        let mut board = NoticeBoard::default();
        let first = board.show(Notice::info("Actualisation des missions..."));
        let second = board.show(Notice::success("2 mission(s) chargée(s)"));

        board.dismiss(first);
        assert!(board.visible());

        board.dismiss(second);
        assert!(!board.visible());
    }
}
