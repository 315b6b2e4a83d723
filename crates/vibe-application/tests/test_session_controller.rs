use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use vibe_application::{CreateCommand, PublishUseCase, SessionController, SessionFactory};
use vibe_core::applet::{GeneratedApplet, MetadataPatch};
use vibe_core::auth::{AuthorizationGate, TeacherIdentity, TeacherProfile};
use vibe_core::catalog::{Catalog, CatalogRepository, default_catalog};
use vibe_core::error::{Result, ValidationError, VibeError};
use vibe_core::gallery::{GalleryEntry, GalleryFilter, GalleryRepository};
use vibe_core::generation::{AppletGenerator, GenerationRequest};
use vibe_core::publish::{LinkShortener, ObjectStore};
use vibe_core::session::{
    SessionFilter, SessionRepository, SessionSnapshot, SessionState, Speaker,
};
use vibe_core::Language;
use vibe_infrastructure::{InMemoryGalleryRepository, InMemorySessionRepository};

// ============================================================================
// Mock collaborators
// ============================================================================

#[derive(Default)]
struct MockGenerator {
    responses: Mutex<VecDeque<Result<GeneratedApplet>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerator {
    fn push(&self, response: Result<GeneratedApplet>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppletGenerator for MockGenerator {
    async fn invoke(&self, request: &GenerationRequest) -> Result<GeneratedApplet> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(VibeError::internal("no scripted response")))
    }
}

struct MockGate {
    authorized: AtomicBool,
    checks: Mutex<usize>,
}

impl MockGate {
    fn new(authorized: bool) -> Self {
        Self {
            authorized: AtomicBool::new(authorized),
            checks: Mutex::new(0),
        }
    }

    fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::SeqCst);
    }

    fn checks(&self) -> usize {
        *self.checks.lock().unwrap()
    }
}

#[async_trait]
impl AuthorizationGate for MockGate {
    async fn is_authorized_creator(&self, _identity: &TeacherIdentity) -> Result<bool> {
        *self.checks.lock().unwrap() += 1;
        Ok(self.authorized.load(Ordering::SeqCst))
    }

    async fn teacher_profile(&self, identity: &TeacherIdentity) -> Result<Option<TeacherProfile>> {
        Ok(self.authorized.load(Ordering::SeqCst).then(|| TeacherProfile {
            email: identity.email.clone(),
            school_code: Some("123456789".to_string()),
        }))
    }
}

#[derive(Default)]
struct MockObjectStore {
    puts: Mutex<Vec<(String, Vec<u8>, String)>>,
}

impl MockObjectStore {
    fn puts(&self) -> Vec<(String, Vec<u8>, String)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.puts
            .lock()
            .unwrap()
            .push((path.to_string(), bytes, content_type.to_string()));
        Ok(format!("https://storage.example.org/{path}"))
    }
}

struct MockShortener {
    fail: bool,
}

#[async_trait]
impl LinkShortener for MockShortener {
    async fn shorten(&self, url: &str) -> Result<String> {
        if self.fail {
            Err(VibeError::backend_unavailable("bitly down"))
        } else {
            Ok(format!("https://bit.ly/{}", url.len()))
        }
    }
}

/// Gallery that accepts new entries but rejects updates to existing ones.
#[derive(Default)]
struct InsertOnlyGallery {
    inner: InMemoryGalleryRepository,
}

#[async_trait]
impl GalleryRepository for InsertOnlyGallery {
    async fn upsert(&self, id: Option<&str>, record: &GalleryEntry) -> Result<String> {
        match id {
            Some(_) => Err(VibeError::persistence("gallery is read-only")),
            None => self.inner.upsert(None, record).await,
        }
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryEntry>> {
        self.inner.get(id).await
    }

    async fn query(&self, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>> {
        self.inner.query(filter).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.inner.delete(id).await
    }
}

struct StaticCatalog;

#[async_trait]
impl CatalogRepository for StaticCatalog {
    async fn load(&self) -> Result<Catalog> {
        Ok(default_catalog())
    }
}

struct FailingSessionRepository;

#[async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn upsert(&self, _id: Option<&str>, _record: &SessionSnapshot) -> Result<String> {
        Err(VibeError::persistence("disk full"))
    }

    async fn get(&self, _id: &str) -> Result<Option<SessionSnapshot>> {
        Ok(None)
    }

    async fn query(&self, _filter: &SessionFilter) -> Result<Vec<SessionSnapshot>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    generator: Arc<MockGenerator>,
    gate: Arc<MockGate>,
    objects: Arc<MockObjectStore>,
    gallery: Arc<InMemoryGalleryRepository>,
    sessions: Arc<dyn SessionRepository>,
    factory: SessionFactory,
}

impl Harness {
    fn build(authorized: bool, shortener_fails: bool, sessions: Arc<dyn SessionRepository>) -> Self {
        let generator = Arc::new(MockGenerator::default());
        let gate = Arc::new(MockGate::new(authorized));
        let objects = Arc::new(MockObjectStore::default());
        let gallery = Arc::new(InMemoryGalleryRepository::new());
        let publisher = PublishUseCase::new(gate.clone(), objects.clone(), gallery.clone())
            .with_shortener(Arc::new(MockShortener {
                fail: shortener_fails,
            }));
        let factory = SessionFactory::new(
            gate.clone(),
            generator.clone(),
            Arc::new(StaticCatalog),
            sessions.clone(),
            Arc::new(publisher),
        );
        Self {
            generator,
            gate,
            objects,
            gallery,
            sessions,
            factory,
        }
    }

    fn new() -> Self {
        Self::build(true, false, Arc::new(InMemorySessionRepository::new()))
    }

    fn controller(&self) -> SessionController {
        self.controller_for("dana@school.org")
    }

    fn controller_for(&self, email: &str) -> SessionController {
        self.factory
            .create_controller(TeacherIdentity::from_email(email), Language::English)
    }
}

fn applet(code: &str, name: Option<&str>, domain: Option<&str>) -> GeneratedApplet {
    GeneratedApplet {
        code: code.to_string(),
        metadata: MetadataPatch {
            name: name.map(str::to_string),
            target_level: Some("Grade 4".to_string()),
            domain: domain.map(str::to_string),
            sub_domain: None,
            pedagogical_explanation: None,
        },
    }
}

fn create_command() -> CreateCommand {
    CreateCommand {
        persona_id: "socratic-guide".to_string(),
        template_id: "quiz".to_string(),
        content: "Fractions for grade 4".to_string(),
        language: Language::English,
    }
}

async fn created(harness: &Harness) -> SessionController {
    let controller = harness.controller();
    harness
        .generator
        .push(Ok(applet("<html>v1</html>", Some("Fraction Quiz"), Some("Math"))));
    controller.generate(create_command()).await.unwrap();
    controller
}

fn validation(err: &VibeError) -> ValidationError {
    err.validation()
        .cloned()
        .unwrap_or_else(|| panic!("expected validation error, got {err:?}"))
}

// ============================================================================
// generate
// ============================================================================

#[tokio::test]
async fn test_generate_starts_lineage() {
    let harness = Harness::new();
    let controller = created(&harness).await;

    let session = controller.session().await;
    assert_eq!(session.state, SessionState::Created);
    assert_eq!(session.generation_count, 1);
    assert_eq!(session.conversation_log.len(), 2);
    assert_eq!(session.conversation_log[0].speaker, Speaker::User);
    assert_eq!(session.conversation_log[0].text, "Fractions for grade 4");
    assert_eq!(session.conversation_log[1].speaker, Speaker::System);
    assert_eq!(session.current_applet.unwrap().metadata.name, "Fraction Quiz");

    let requests = harness.generator.requests();
    let GenerationRequest::Create(request) = &requests[0] else {
        panic!("expected a create request");
    };
    let catalog = default_catalog();
    assert_eq!(
        request.persona,
        catalog.persona("socratic-guide").unwrap().system_prompt.en
    );
    assert_eq!(
        request.template,
        catalog.template("quiz").unwrap().instructions.en
    );
    assert_eq!(session.original_prompt, Some(requests[0].clone()));
}

#[tokio::test]
async fn test_generate_reports_missing_selection_without_calling() {
    let harness = Harness::new();
    let controller = harness.controller();

    let cases = [
        (
            CreateCommand {
                persona_id: String::new(),
                ..create_command()
            },
            ValidationError::MissingPersona,
        ),
        (
            CreateCommand {
                template_id: " ".into(),
                ..create_command()
            },
            ValidationError::MissingTemplate,
        ),
        (
            CreateCommand {
                content: "\n".into(),
                ..create_command()
            },
            ValidationError::EmptyContent,
        ),
        (
            CreateCommand {
                template_id: "crossword".into(),
                ..create_command()
            },
            ValidationError::UnknownTemplate("crossword".into()),
        ),
    ];

    for (command, expected) in cases {
        let err = controller.generate(command).await.unwrap_err();
        assert_eq!(validation(&err), expected);
    }

    assert!(harness.generator.requests().is_empty());
    assert_eq!(harness.gate.checks(), 0);
    assert_eq!(controller.state().await, SessionState::Empty);
}

#[tokio::test]
async fn test_generate_denied_for_unregistered_teacher() {
    let harness = Harness::build(false, false, Arc::new(InMemorySessionRepository::new()));
    let controller = harness.controller();

    let err = controller.generate(create_command()).await.unwrap_err();

    assert!(err.is_authorization());
    assert!(harness.generator.requests().is_empty());
    assert_eq!(controller.state().await, SessionState::Empty);
}

#[tokio::test]
async fn test_generate_from_refining_resets_log() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    harness.generator.push(Ok(applet("<v2/>", None, None)));
    controller.refine("Add a timer").await.unwrap();

    harness.generator.push(Ok(applet("<new/>", Some("Planets"), None)));
    let session = controller
        .generate(CreateCommand {
            content: "Solar system tour".into(),
            ..create_command()
        })
        .await
        .unwrap();

    assert_eq!(session.generation_count, 1);
    assert_eq!(session.conversation_log.len(), 2);
    assert_eq!(session.state, SessionState::Created);
}

// ============================================================================
// refine
// ============================================================================

#[tokio::test]
async fn test_refine_success_appends_and_counts() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    harness
        .generator
        .push(Ok(applet("<html>v2</html>", Some("Fraction Quiz"), Some("Math"))));

    let session = controller.refine("Make the buttons bigger").await.unwrap();

    assert_eq!(session.state, SessionState::Refining);
    assert_eq!(session.generation_count, 2);
    assert_eq!(session.conversation_log.len(), 4);
    assert_eq!(session.conversation_log[2].speaker, Speaker::User);
    assert_eq!(session.conversation_log[2].text, "Make the buttons bigger");
    assert_eq!(session.conversation_log[3].speaker, Speaker::System);
    assert_eq!(session.current_applet.unwrap().code, "<html>v2</html>");

    let GenerationRequest::Refine(request) = &harness.generator.requests()[1] else {
        panic!("expected a refine request");
    };
    assert_eq!(request.prior_applet.code, "<html>v1</html>");
    assert_eq!(request.language, Language::English);
}

#[tokio::test]
async fn test_failed_refine_leaves_session_untouched() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    let before = controller.session().await;

    harness
        .generator
        .push(Err(VibeError::backend_unavailable("503")));
    let err = controller.refine("Add sound").await.unwrap_err();
    assert!(err.is_backend_unavailable());

    harness
        .generator
        .push(Err(VibeError::malformed("missing htmlCode")));
    let err = controller.refine("Add sound").await.unwrap_err();
    assert!(err.is_malformed_response());

    let after = controller.session().await;
    assert_eq!(after.generation_count, 1);
    assert_eq!(after.current_applet, before.current_applet);
    assert_eq!(after.conversation_log, before.conversation_log);
}

#[tokio::test]
async fn test_partial_metadata_refine_keeps_prior_fields() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    harness.generator.push(Ok(GeneratedApplet {
        code: "<html>v2</html>".into(),
        metadata: MetadataPatch {
            name: Some("Timed Fraction Quiz".into()),
            ..MetadataPatch::default()
        },
    }));

    let session = controller.refine("Add a countdown").await.unwrap();

    let metadata = session.current_applet.unwrap().metadata;
    assert_eq!(metadata.name, "Timed Fraction Quiz");
    assert_eq!(metadata.domain, "Math");
    assert_eq!(metadata.target_level, "Grade 4");
}

#[tokio::test]
async fn test_refine_denied_for_unregistered_teacher() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    let before = controller.session().await;
    harness.gate.set_authorized(false);

    let err = controller.refine("Add a timer").await.unwrap_err();

    assert!(err.is_authorization());
    assert_eq!(harness.generator.requests().len(), 1);
    let after = controller.session().await;
    assert_eq!(after.generation_count, 1);
    assert_eq!(after.state, SessionState::Created);
    assert_eq!(after.current_applet, before.current_applet);
    assert_eq!(after.conversation_log, before.conversation_log);
}

#[tokio::test]
async fn test_refine_preconditions() {
    let harness = Harness::new();
    let controller = harness.controller();

    let err = controller.refine("Make it blue").await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::NoAppletToRefine);

    let controller = created(&harness).await;
    let err = controller.refine("   ").await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::EmptyChangeRequest);
    assert_eq!(harness.generator.requests().len(), 1);
}

// ============================================================================
// publish
// ============================================================================

#[tokio::test]
async fn test_publish_without_code_touches_nothing() {
    let harness = Harness::new();
    let controller = harness.controller();

    let err = controller.publish().await.unwrap_err();

    assert_eq!(validation(&err), ValidationError::EmptyCode);
    assert!(harness.objects.puts().is_empty());
    assert_eq!(harness.gallery.count().await, 0);
    assert_eq!(harness.gate.checks(), 0);
}

#[tokio::test]
async fn test_publish_requires_app_name() {
    let harness = Harness::new();
    let controller = harness.controller();
    controller.load_external_code("<html>mine</html>").await.unwrap();

    let err = controller.publish().await.unwrap_err();

    assert_eq!(validation(&err), ValidationError::MissingAppName);
    assert!(harness.objects.puts().is_empty());
}

#[tokio::test]
async fn test_publish_uploads_and_records_entry() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    let uid = controller.identity().uid.clone();

    let receipt = controller.publish().await.unwrap();

    let puts = harness.objects.puts();
    assert_eq!(puts.len(), 1);
    assert!(puts[0].0.starts_with(&format!("apps/{uid}/")));
    assert!(puts[0].0.ends_with("/index.html"));
    assert_eq!(puts[0].1, b"<html>v1</html>".to_vec());
    assert_eq!(puts[0].2, "text/html; charset=utf-8");
    assert!(receipt.short_url.starts_with("https://bit.ly/"));
    assert!(receipt.qr_code_data_url.is_none());

    let entry = harness.gallery.get(&receipt.entry_id).await.unwrap().unwrap();
    assert_eq!(entry.owner_uid, uid);
    assert_eq!(entry.school_code, "123456789");
    assert_eq!(entry.app_url, receipt.long_url);
    assert_eq!(entry.short_url, receipt.short_url);
    assert_eq!(entry.generation_count, 1);
    assert_eq!(entry.conversation_log.len(), 2);

    let session = controller.session().await;
    assert_eq!(session.state, SessionState::Published);
    assert_eq!(session.published_entry_id, Some(receipt.entry_id.clone()));
    assert_eq!(session.conversation_log.len(), 2);
    assert_eq!(session.generation_count, 1);
}

#[tokio::test]
async fn test_publish_twice_requires_refine_between() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    controller.publish().await.unwrap();

    let err = controller.publish().await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::AlreadyPublished);

    harness.generator.push(Ok(applet("<v2/>", None, None)));
    let session = controller.refine("Add a hint button").await.unwrap();
    assert_eq!(session.state, SessionState::Refining);

    controller.publish().await.unwrap();
    let entries = harness
        .gallery
        .query(&GalleryFilter::default())
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_publish_falls_back_to_long_url_when_shortener_fails() {
    let harness = Harness::build(true, true, Arc::new(InMemorySessionRepository::new()));
    let controller = created(&harness).await;

    let receipt = controller.publish().await.unwrap();

    assert_eq!(receipt.short_url, receipt.long_url);
    let entry = harness.gallery.get(&receipt.entry_id).await.unwrap().unwrap();
    assert_eq!(entry.short_url, entry.app_url);
}

#[tokio::test]
async fn test_publish_keeps_long_url_when_short_link_cannot_be_recorded() {
    let gate = Arc::new(MockGate::new(true));
    let generator = Arc::new(MockGenerator::default());
    let gallery = Arc::new(InsertOnlyGallery::default());
    let publisher = PublishUseCase::new(
        gate.clone(),
        Arc::new(MockObjectStore::default()),
        gallery.clone(),
    )
    .with_shortener(Arc::new(MockShortener { fail: false }));
    let factory = SessionFactory::new(
        gate,
        generator.clone(),
        Arc::new(StaticCatalog),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(publisher),
    );
    let controller = factory.create_controller(
        TeacherIdentity::from_email("dana@school.org"),
        Language::English,
    );
    generator.push(Ok(applet("<html>v1</html>", Some("Fraction Quiz"), None)));
    controller.generate(create_command()).await.unwrap();

    let receipt = controller.publish().await.unwrap();

    assert_eq!(receipt.short_url, receipt.long_url);
    assert!(receipt.qr_code_data_url.is_none());
    let entry = gallery.get(&receipt.entry_id).await.unwrap().unwrap();
    assert_eq!(entry.short_url, entry.app_url);
    assert_eq!(controller.state().await, SessionState::Published);

    let err = controller.publish().await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::AlreadyPublished);
    let entries = gallery.query(&GalleryFilter::default()).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_publish_denied_leaves_no_trace() {
    let harness = Harness::build(false, false, Arc::new(InMemorySessionRepository::new()));
    let controller = harness.controller();
    controller.load_external_code("<html></html>").await.unwrap();
    controller.save("draft").await.unwrap();
    // Give it a name so only the gate can refuse.
    {
        let mut snapshot = harness
            .sessions
            .query(&SessionFilter::default())
            .await
            .unwrap()
            .remove(0);
        snapshot.metadata.name = "Named".into();
        let id = snapshot.id.clone().unwrap();
        harness.sessions.upsert(Some(id.as_str()), &snapshot).await.unwrap();
        controller.load(&id).await.unwrap();
    }

    let err = controller.publish().await.unwrap_err();

    assert!(err.is_authorization());
    assert!(harness.objects.puts().is_empty());
    assert_eq!(harness.gallery.count().await, 0);
    assert_ne!(controller.state().await, SessionState::Published);
}

// ============================================================================
// external code
// ============================================================================

#[tokio::test]
async fn test_external_code_clears_log_and_metadata() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    controller.save("Quiz").await.unwrap();

    let session = controller
        .load_external_code("<html><body>Imported</body></html>")
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Created);
    assert!(session.conversation_log.is_empty());
    let applet = session.current_applet.unwrap();
    assert_eq!(applet.code, "<html><body>Imported</body></html>");
    assert!(applet.metadata.is_empty());
    assert_eq!(session.generation_count, 0);
    assert!(session.original_prompt.is_none());
    assert!(session.id.is_none());
}

#[tokio::test]
async fn test_external_code_must_not_be_blank() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    let before = controller.session().await;

    let err = controller.load_external_code(" \n ").await.unwrap_err();

    assert_eq!(validation(&err), ValidationError::EmptyCode);
    assert_eq!(controller.session().await, before);
}

// ============================================================================
// save / load
// ============================================================================

#[tokio::test]
async fn test_save_preconditions() {
    let harness = Harness::new();
    let controller = harness.controller();

    let err = controller.save("draft").await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::NothingToSave);

    let controller = created(&harness).await;
    let err = controller.save("  ").await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::MissingSessionName);
}

#[tokio::test]
async fn test_save_is_upsert_by_id() {
    let harness = Harness::new();
    let controller = created(&harness).await;

    let first = controller.save("Fractions").await.unwrap();
    harness.generator.push(Ok(applet("<v2/>", None, None)));
    controller.refine("Add hints").await.unwrap();
    let second = controller.save("Fractions, with hints").await.unwrap();

    assert_eq!(first, second);
    let saved = controller.saved_sessions().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Fractions, with hints");
    assert_eq!(saved[0].generation_count, 2);
}

#[tokio::test]
async fn test_load_restores_session() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    harness.generator.push(Ok(applet("<v2/>", None, None)));
    controller.refine("Add hints").await.unwrap();
    let id = controller.save("Fractions").await.unwrap();
    let original = controller.session().await;

    let fresh = harness.controller();
    let loaded = fresh.load(&id).await.unwrap();

    assert_eq!(loaded.id.as_deref(), Some(id.as_str()));
    assert_eq!(loaded.name.as_deref(), Some("Fractions"));
    assert_eq!(loaded.state, SessionState::Refining);
    assert_eq!(loaded.generation_count, 2);
    assert_eq!(loaded.current_applet, original.current_applet);
    assert_eq!(loaded.conversation_log, original.conversation_log);
    assert_eq!(loaded.original_prompt, original.original_prompt);
}

#[tokio::test]
async fn test_published_session_reloads_as_published() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    let receipt = controller.publish().await.unwrap();
    let id = controller.save("Fractions").await.unwrap();

    let fresh = harness.controller();
    let loaded = fresh.load(&id).await.unwrap();
    assert_eq!(loaded.state, SessionState::Published);
    assert_eq!(loaded.published_entry_id, Some(receipt.entry_id));

    let err = fresh.publish().await.unwrap_err();
    assert_eq!(validation(&err), ValidationError::AlreadyPublished);
    assert_eq!(harness.gallery.count().await, 1);
    assert_eq!(harness.objects.puts().len(), 1);
}

#[tokio::test]
async fn test_load_checks_existence_and_owner() {
    let harness = Harness::new();
    let controller = created(&harness).await;
    let id = controller.save("Mine").await.unwrap();

    let err = controller.load("no-such-id").await.unwrap_err();
    assert!(err.is_not_found());

    let other = harness.controller_for("noa@school.org");
    let err = other.load(&id).await.unwrap_err();
    assert!(err.is_authorization());
    assert_eq!(other.state().await, SessionState::Empty);
    assert!(other.saved_sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_failure_keeps_name_in_memory() {
    let harness = Harness::build(true, false, Arc::new(FailingSessionRepository));
    let controller = created(&harness).await;

    let err = controller.save("Unsaved").await.unwrap_err();

    assert!(err.is_persistence());
    let session = controller.session().await;
    assert_eq!(session.name.as_deref(), Some("Unsaved"));
    assert!(session.id.is_none());
    assert_eq!(session.generation_count, 1);
}

// ============================================================================
// busy flag
// ============================================================================

/// Generator that parks until released, to hold a transition open.
struct ParkedGenerator {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl AppletGenerator for ParkedGenerator {
    async fn invoke(&self, _request: &GenerationRequest) -> Result<GeneratedApplet> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(applet("<parked/>", Some("Parked"), None))
    }
}

#[tokio::test]
async fn test_concurrent_transition_is_rejected() {
    let generator = Arc::new(ParkedGenerator {
        started: Notify::new(),
        release: Notify::new(),
    });
    let gate = Arc::new(MockGate::new(true));
    let publisher = PublishUseCase::new(
        gate.clone(),
        Arc::new(MockObjectStore::default()),
        Arc::new(InMemoryGalleryRepository::new()),
    );
    let factory = SessionFactory::new(
        gate,
        generator.clone(),
        Arc::new(StaticCatalog),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(publisher),
    );
    let controller = factory.create_controller(
        TeacherIdentity::from_email("dana@school.org"),
        Language::English,
    );

    let (generated, competing) = tokio::join!(controller.generate(create_command()), async {
        generator.started.notified().await;
        let results = (
            controller.refine("Faster").await,
            controller.load_external_code("<html/>").await,
            controller.save("draft").await,
        );
        generator.release.notify_one();
        results
    });

    let session = generated.unwrap();
    assert_eq!(session.current_applet.unwrap().code, "<parked/>");
    for err in [
        competing.0.unwrap_err(),
        competing.1.unwrap_err(),
        competing.2.unwrap_err(),
    ] {
        assert_eq!(validation(&err), ValidationError::OperationInProgress);
    }

    // The flag is released once the first transition completes.
    let id = controller.save("after").await.unwrap();
    assert!(!id.is_empty());
}
