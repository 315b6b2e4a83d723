use serde::{Deserialize, Serialize};

/// Lifecycle state of an editing session.
///
/// `Published` only blocks publishing the same version twice; the session can
/// still be refined, which moves it back to `Refining`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No applet yet.
    #[default]
    Empty,
    /// One applet exists, produced by a create or an import.
    Created,
    /// The applet has been refined at least once.
    Refining,
    /// The current applet has been published to the gallery.
    Published,
}

impl SessionState {
    pub fn has_applet(&self) -> bool {
        !matches!(self, SessionState::Empty)
    }

    pub fn can_refine(&self) -> bool {
        self.has_applet()
    }

    pub fn can_publish(&self) -> bool {
        matches!(self, SessionState::Created | SessionState::Refining)
    }
}
