//! Publish use case.
//!
//! Uploads the current applet, records it in the gallery, and attaches a
//! short link and QR code when those services cooperate.

use std::sync::Arc;
use vibe_core::auth::{AuthorizationGate, DEFAULT_SCHOOL_CODE, TeacherIdentity};
use vibe_core::error::{Result, ValidationError, VibeError};
use vibe_core::gallery::{GalleryEntry, GalleryRepository};
use vibe_core::publish::{
    HTML_CONTENT_TYPE, LinkShortener, ObjectStore, PublishReceipt, QrEncoder, applet_object_path,
};
use vibe_core::session::Session;

pub struct PublishUseCase {
    gate: Arc<dyn AuthorizationGate>,
    objects: Arc<dyn ObjectStore>,
    gallery: Arc<dyn GalleryRepository>,
    shortener: Option<Arc<dyn LinkShortener>>,
    qr_encoder: Option<Arc<dyn QrEncoder>>,
}

impl PublishUseCase {
    pub fn new(
        gate: Arc<dyn AuthorizationGate>,
        objects: Arc<dyn ObjectStore>,
        gallery: Arc<dyn GalleryRepository>,
    ) -> Self {
        Self {
            gate,
            objects,
            gallery,
            shortener: None,
            qr_encoder: None,
        }
    }

    pub fn with_shortener(mut self, shortener: Arc<dyn LinkShortener>) -> Self {
        self.shortener = Some(shortener);
        self
    }

    pub fn with_qr_encoder(mut self, encoder: Arc<dyn QrEncoder>) -> Self {
        self.qr_encoder = Some(encoder);
        self
    }

    /// Publishes the session's current applet on behalf of `owner`.
    ///
    /// Input is validated before the gate is consulted, and nothing is
    /// written unless both pass. Shortening and QR encoding failures are
    /// logged and degrade to the long URL and no image, as does a failure to
    /// record them on the already written entry.
    pub async fn publish(&self, owner: &TeacherIdentity, session: &Session) -> Result<PublishReceipt> {
        let applet = session
            .current_applet
            .as_ref()
            .filter(|applet| applet.has_code())
            .ok_or(ValidationError::EmptyCode)?;
        if applet.metadata.name.trim().is_empty() {
            return Err(ValidationError::MissingAppName.into());
        }

        if !self.gate.is_authorized_creator(owner).await? {
            return Err(VibeError::unauthorized(format!(
                "{} is not a registered teacher",
                owner.email
            )));
        }

        let school_code = self
            .gate
            .teacher_profile(owner)
            .await?
            .map(|profile| profile.school_code().to_string())
            .unwrap_or_else(|| DEFAULT_SCHOOL_CODE.to_string());

        let path = applet_object_path(&owner.uid, chrono::Utc::now().timestamp_millis());
        let long_url = self
            .objects
            .put(&path, applet.code.as_bytes().to_vec(), HTML_CONTENT_TYPE)
            .await?;

        let mut entry = GalleryEntry::from_session(
            session,
            applet.metadata.clone(),
            owner,
            school_code,
            long_url.clone(),
        );
        let entry_id = self.gallery.upsert(None, &entry).await?;
        tracing::info!(entry_id = %entry_id, path = %path, "Published applet");

        let short_url = self.shorten(&long_url).await;
        let qr_code_data_url = self.encode_qr(&long_url).await;

        let mut receipt = PublishReceipt {
            entry_id,
            long_url,
            short_url,
            qr_code_data_url,
        };
        if receipt.short_url != receipt.long_url || receipt.qr_code_data_url.is_some() {
            entry.short_url = receipt.short_url.clone();
            entry.qr_code_data_url = receipt.qr_code_data_url.clone();
            let stored = self
                .gallery
                .upsert(Some(receipt.entry_id.as_str()), &entry)
                .await;
            if let Err(err) = stored {
                tracing::warn!(
                    "Recording short link for {} failed, keeping long URL: {}",
                    receipt.entry_id,
                    err
                );
                receipt.short_url = receipt.long_url.clone();
                receipt.qr_code_data_url = None;
            }
        }

        Ok(receipt)
    }

    async fn shorten(&self, long_url: &str) -> String {
        let Some(shortener) = &self.shortener else {
            return long_url.to_string();
        };
        match shortener.shorten(long_url).await {
            Ok(short) => short,
            Err(err) => {
                tracing::warn!("Link shortening failed, using long URL: {}", err);
                long_url.to_string()
            }
        }
    }

    async fn encode_qr(&self, long_url: &str) -> Option<String> {
        let encoder = self.qr_encoder.as_ref()?;
        match encoder.encode(long_url).await {
            Ok(data_url) => Some(data_url),
            Err(err) => {
                tracing::warn!("QR encoding failed: {}", err);
                None
            }
        }
    }
}
