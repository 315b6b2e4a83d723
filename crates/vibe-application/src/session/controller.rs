//! Session state machine.
//!
//! One `SessionController` owns one teacher's in-memory session and runs
//! every transition on it. A transition either completes or leaves the
//! session exactly as it was, with the single exception of `save`, which
//! keeps the new name even when the store fails.

use crate::publish_usecase::PublishUseCase;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use vibe_core::Language;
use vibe_core::auth::{AuthorizationGate, TeacherIdentity};
use vibe_core::catalog::CatalogRepository;
use vibe_core::error::{Result, ValidationError, VibeError};
use vibe_core::generation::{AppletGenerator, CreateRequest, GenerationRequest};
use vibe_core::publish::PublishReceipt;
use vibe_core::session::{
    Session, SessionFilter, SessionRepository, SessionSnapshot, SessionState,
};

/// A teacher's selections for a brand-new applet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommand {
    pub persona_id: String,
    pub template_id: String,
    pub content: String,
    pub language: Language,
}

/// Collaborators shared by every controller.
#[derive(Clone)]
pub(crate) struct ControllerDeps {
    pub gate: Arc<dyn AuthorizationGate>,
    pub generator: Arc<dyn AppletGenerator>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub publisher: Arc<PublishUseCase>,
}

pub struct SessionController {
    identity: TeacherIdentity,
    session: RwLock<Session>,
    busy: AtomicBool,
    deps: ControllerDeps,
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionController {
    pub(crate) fn new(identity: TeacherIdentity, language: Language, deps: ControllerDeps) -> Self {
        let session = Session::new(identity.uid.clone(), language);
        Self {
            identity,
            session: RwLock::new(session),
            busy: AtomicBool::new(false),
            deps,
        }
    }

    pub fn identity(&self) -> &TeacherIdentity {
        &self.identity
    }

    /// A copy of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        self.session.read().await.state
    }

    fn begin(&self) -> Result<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| VibeError::from(ValidationError::OperationInProgress))?;
        Ok(BusyGuard(&self.busy))
    }

    async fn ensure_authorized(&self) -> Result<()> {
        if self.deps.gate.is_authorized_creator(&self.identity).await? {
            Ok(())
        } else {
            Err(VibeError::unauthorized(format!(
                "{} is not a registered teacher",
                self.identity.email
            )))
        }
    }

    /// Generates a brand-new applet, discarding the current lineage.
    pub async fn generate(&self, command: CreateCommand) -> Result<Session> {
        let _busy = self.begin()?;

        if command.persona_id.trim().is_empty() {
            return Err(ValidationError::MissingPersona.into());
        }
        if command.template_id.trim().is_empty() {
            return Err(ValidationError::MissingTemplate.into());
        }
        if command.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }

        let catalog = self.deps.catalog.load().await?;
        let persona = catalog.require_persona(&command.persona_id)?;
        let template = catalog.require_template(&command.template_id)?;

        self.ensure_authorized().await?;

        let request = CreateRequest {
            persona: persona.system_prompt.get(command.language).to_string(),
            template: template.instructions.get(command.language).to_string(),
            content: command.content.trim().to_string(),
            language: command.language,
        };
        let generated = self
            .deps
            .generator
            .invoke(&GenerationRequest::Create(request.clone()))
            .await?;

        let mut session = self.session.write().await;
        session.apply_create(request, generated);
        tracing::info!(
            uid = %self.identity.uid,
            persona = %command.persona_id,
            template = %command.template_id,
            "Created applet"
        );
        Ok(session.clone())
    }

    /// Applies a change request to the current applet.
    pub async fn refine(&self, change_request: &str) -> Result<Session> {
        let _busy = self.begin()?;

        let (prior, language) = {
            let session = self.session.read().await;
            let prior = session
                .current_applet
                .clone()
                .filter(|_| session.state.can_refine())
                .ok_or(ValidationError::NoAppletToRefine)?;
            (prior, session.language)
        };
        let change_request = change_request.trim();
        if change_request.is_empty() {
            return Err(ValidationError::EmptyChangeRequest.into());
        }

        self.ensure_authorized().await?;

        let generated = self
            .deps
            .generator
            .invoke(&GenerationRequest::refine(prior, change_request, language))
            .await?;

        let mut session = self.session.write().await;
        session.apply_refine(change_request, generated);
        tracing::info!(
            uid = %self.identity.uid,
            generation = session.generation_count,
            "Refined applet"
        );
        Ok(session.clone())
    }

    /// Publishes the current applet to the gallery.
    pub async fn publish(&self) -> Result<PublishReceipt> {
        let _busy = self.begin()?;

        let snapshot = self.session.read().await.clone();
        if snapshot.state == SessionState::Published {
            return Err(ValidationError::AlreadyPublished.into());
        }

        let receipt = self.deps.publisher.publish(&self.identity, &snapshot).await?;

        self.session.write().await.mark_published(&receipt.entry_id);
        Ok(receipt)
    }

    /// Saves the session under `name` and returns its id.
    ///
    /// The first save assigns an id; later saves overwrite the same record.
    pub async fn save(&self, name: &str) -> Result<String> {
        let _busy = self.begin()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingSessionName.into());
        }

        let mut session = self.session.write().await;
        if !session.state.has_applet() {
            return Err(ValidationError::NothingToSave.into());
        }

        session.name = Some(name.to_string());
        session.touch();
        let snapshot =
            SessionSnapshot::capture(&session, name).ok_or(ValidationError::NothingToSave)?;

        let id = self
            .deps
            .sessions
            .upsert(session.id.as_deref(), &snapshot)
            .await?;
        session.id = Some(id.clone());
        tracing::info!(session_id = %id, "Saved session");
        Ok(id)
    }

    /// Replaces the in-memory session with a saved one.
    pub async fn load(&self, id: &str) -> Result<Session> {
        let _busy = self.begin()?;

        let snapshot = self
            .deps
            .sessions
            .get(id)
            .await?
            .ok_or_else(|| VibeError::not_found("session", id))?;
        if snapshot.owner_uid != self.identity.uid {
            return Err(VibeError::unauthorized(format!(
                "session '{}' belongs to another teacher",
                id
            )));
        }

        let mut loaded = snapshot.into_session();
        loaded.id = Some(id.to_string());

        let mut session = self.session.write().await;
        *session = loaded;
        Ok(session.clone())
    }

    /// Adopts externally authored code as a fresh, unsaved lineage.
    pub async fn load_external_code(&self, code: &str) -> Result<Session> {
        let _busy = self.begin()?;

        if code.trim().is_empty() {
            return Err(ValidationError::EmptyCode.into());
        }

        let mut session = self.session.write().await;
        session.apply_external_code(code);
        Ok(session.clone())
    }

    /// The caller's saved sessions, most recently updated first.
    pub async fn saved_sessions(&self) -> Result<Vec<SessionSnapshot>> {
        self.deps
            .sessions
            .query(&SessionFilter::owned_by(&self.identity.uid))
            .await
    }
}
