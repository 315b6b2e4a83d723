use super::controller::{ControllerDeps, SessionController};
use crate::publish_usecase::PublishUseCase;
use std::sync::Arc;
use vibe_core::Language;
use vibe_core::auth::{AuthorizationGate, TeacherIdentity};
use vibe_core::catalog::CatalogRepository;
use vibe_core::generation::AppletGenerator;
use vibe_core::session::SessionRepository;

/// Factory for creating `SessionController` instances.
///
/// Holds the collaborators every controller shares, so callers only supply
/// the teacher and the starting language.
pub struct SessionFactory {
    deps: ControllerDeps,
}

impl SessionFactory {
    /// Creates a new SessionFactory.
    ///
    /// # Arguments
    ///
    /// * `gate` - Checked before create, refine and publish
    /// * `generator` - Produces applets from generation requests
    /// * `catalog` - Resolves persona and template selections
    /// * `sessions` - Store for saved sessions
    /// * `publisher` - Performs the publish flow
    pub fn new(
        gate: Arc<dyn AuthorizationGate>,
        generator: Arc<dyn AppletGenerator>,
        catalog: Arc<dyn CatalogRepository>,
        sessions: Arc<dyn SessionRepository>,
        publisher: Arc<PublishUseCase>,
    ) -> Self {
        Self {
            deps: ControllerDeps {
                gate,
                generator,
                catalog,
                sessions,
                publisher,
            },
        }
    }

    /// Creates a controller holding an empty session for `identity`.
    pub fn create_controller(&self, identity: TeacherIdentity, language: Language) -> SessionController {
        SessionController::new(identity, language, self.deps.clone())
    }
}
