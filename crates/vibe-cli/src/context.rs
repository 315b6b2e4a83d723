//! Wires configuration, secrets and adapters into the application layer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use vibe_application::{GalleryUseCase, PublishUseCase, SessionController, SessionFactory};
use vibe_core::Language;
use vibe_core::applet::GeneratedApplet;
use vibe_core::auth::TeacherIdentity;
use vibe_core::catalog::CatalogRepository;
use vibe_core::config::StudioConfig;
use vibe_core::error::VibeError;
use vibe_core::generation::{AppletGenerator, GenerationRequest, GenerativeBackend};
use vibe_interaction::{
    BitlyShortener, GeminiBackend, GenerationInvoker, SecretConfig, load_secret_config,
};
use vibe_infrastructure::{
    ConfigService, DirGalleryRepository, DirSessionRepository, LocalObjectStore,
    RosterAuthorizationGate, TomlCatalogRepository, VibePaths,
};

/// Generator used when no Gemini credentials are configured.
///
/// Commands that never generate still work; the ones that do fail with the
/// configuration error.
struct MissingBackend(String);

#[async_trait]
impl AppletGenerator for MissingBackend {
    async fn invoke(&self, _request: &GenerationRequest) -> vibe_core::Result<GeneratedApplet> {
        Err(VibeError::config(self.0.clone()))
    }
}

pub struct AppContext {
    pub config: StudioConfig,
    pub roster: Arc<RosterAuthorizationGate>,
    catalog: Arc<TomlCatalogRepository>,
    pub gallery: GalleryUseCase,
    factory: SessionFactory,
    email: Option<String>,
    language: Option<String>,
}

impl AppContext {
    /// Resolves the storage layout and reads `config.toml`.
    ///
    /// `config_dir` replaces the platform directories; data then lives
    /// beside the config unless `data_dir` is set in `config.toml`.
    pub fn resolve_config(config_dir: Option<PathBuf>) -> Result<(VibePaths, StudioConfig)> {
        let base_paths = match config_dir {
            Some(dir) => VibePaths::new(dir.clone(), dir),
            None => VibePaths::from_system()?,
        };
        let config = ConfigService::from_paths(&base_paths)
            .get_config()
            .context("Failed to load config.toml")?;
        let paths = base_paths.with_overrides(&config);
        Ok((paths, config))
    }

    /// Loads secrets and builds every collaborator.
    pub async fn build(
        paths: VibePaths,
        config: StudioConfig,
        email: Option<String>,
        language: Option<String>,
    ) -> Result<Self> {
        let secrets = load_secret_config(&paths.secret_file())?;

        let roster = Arc::new(RosterAuthorizationGate::from_file(paths.roster_file()));
        let catalog = Arc::new(TomlCatalogRepository::with_path(paths.catalog_file()));
        let sessions = Arc::new(DirSessionRepository::from_paths(&paths).await?);
        let gallery_repo = Arc::new(DirGalleryRepository::from_paths(&paths).await?);
        let objects = Arc::new(
            LocalObjectStore::new(paths.objects_dir())
                .with_public_base_url(config.public_base_url.clone()),
        );

        let mut publisher = PublishUseCase::new(roster.clone(), objects, gallery_repo.clone());
        if let Some(bitly) = &secrets.bitly {
            let shortener = BitlyShortener::with_timeout(
                bitly.access_token.clone(),
                Duration::from_secs(config.shorten_timeout_secs),
            )?;
            publisher = publisher.with_shortener(Arc::new(shortener));
        }

        let factory = SessionFactory::new(
            roster.clone(),
            build_generator(&config, &secrets)?,
            catalog.clone(),
            sessions,
            Arc::new(publisher),
        );

        Ok(Self {
            gallery: GalleryUseCase::new(gallery_repo),
            config,
            roster,
            catalog,
            factory,
            email,
            language,
        })
    }

    /// The acting teacher, from `--email`.
    pub fn identity(&self) -> Result<TeacherIdentity> {
        let email = self
            .email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .context("This command needs the acting teacher's --email")?;
        Ok(TeacherIdentity::from_email(email))
    }

    /// `--language` when given, the configured default otherwise.
    pub fn language(&self) -> Language {
        match &self.language {
            Some(code) => Language::resolve(code).language,
            None => self.config.default_language,
        }
    }

    pub fn controller(&self) -> Result<SessionController> {
        Ok(self
            .factory
            .create_controller(self.identity()?, self.language()))
    }

    pub async fn catalog(&self) -> Result<vibe_core::catalog::Catalog> {
        Ok(self.catalog.load().await?)
    }
}

fn build_generator(
    config: &StudioConfig,
    secrets: &SecretConfig,
) -> Result<Arc<dyn AppletGenerator>> {
    let gemini = match secrets.require_gemini() {
        Ok(gemini) => gemini,
        Err(err) => return Ok(Arc::new(MissingBackend(err.to_string()))),
    };
    let model = gemini
        .model_name
        .clone()
        .unwrap_or_else(|| config.model_name.clone());
    let backend = GeminiBackend::with_timeout(
        gemini.api_key.clone(),
        model,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::debug!(model = backend.model_name(), "Gemini backend ready");
    Ok(Arc::new(GenerationInvoker::new(Arc::new(backend))))
}
