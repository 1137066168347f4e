//! Command handlers for the generation context.
//!
//! This module contains the palace generation workflow: validate, generate,
//! optionally translate, then append the record.

use std::sync::Arc;

use palace_core::clock::Clock;
use palace_core::command::Command;
use palace_core::error::DomainError;
use palace_core::gateway::{SceneGenerator, TranslationOutcome, Translator};
use palace_core::language::LanguageCode;
use palace_core::palace::PalaceRecord;
use palace_core::repository::PalaceRepository;
use palace_core::session::SubmissionGate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::GeneratePalace;
use crate::domain::prompt::{MISSING_INPUT_WARNING, build_scene_prompt};

/// The translation attempt made for a generated scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneTranslation {
    /// Target language.
    pub language: LanguageCode,
    /// Heading the translation is shown under.
    pub heading: &'static str,
    /// What the translator returned.
    pub outcome: TranslationOutcome,
    /// Text to display: the translation, or the marked failure reason.
    pub display_text: String,
}

/// Everything a successful generation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPalace {
    /// The record appended to the owner's history.
    pub record: PalaceRecord,
    /// Heading the English scene is shown under.
    pub scene_heading: &'static str,
    /// Present when the session language is not English.
    pub translation: Option<SceneTranslation>,
}

/// Handles the `GeneratePalace` command: validates the inputs, claims the
/// session's submission slot, generates the scene, translates it when the
/// session language is not English, and appends the record.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the topic or location is blank,
/// `DomainError::SubmissionInProgress` when the session already has a
/// generation pending, and `DomainError::GenerationUnavailable` when the
/// generator fails. Nothing is stored in any of these cases. Store failures
/// are propagated.
pub async fn handle_generate_palace(
    command: &GeneratePalace,
    gate: &Arc<SubmissionGate>,
    clock: &dyn Clock,
    generator: &dyn SceneGenerator,
    translator: &dyn Translator,
    palaces: &dyn PalaceRepository,
) -> Result<GeneratedPalace, DomainError> {
    let topic = command.topic.trim();
    let location = command.location.describe();
    if topic.is_empty() || location.is_empty() {
        return Err(DomainError::Validation(MISSING_INPUT_WARNING.into()));
    }

    let _permit = gate.try_acquire()?;

    let prompt = build_scene_prompt(topic, location);
    let scene_text = generator.generate(&prompt).await.map_err(|e| {
        warn!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            user_id = command.actor(),
            error = %e,
            "scene generation failed"
        );
        match e {
            DomainError::GenerationUnavailable(_) => e,
            other => DomainError::GenerationUnavailable(other.to_string()),
        }
    })?;

    let translation = if command.language.needs_translation() {
        let outcome = translator.translate(&scene_text, command.language).await;
        if let TranslationOutcome::Failed(reason) = &outcome {
            warn!(
                correlation_id = %command.correlation_id(),
                language = %command.language,
                reason = %reason,
                "translation failed; storing the scene untranslated"
            );
        }
        Some(SceneTranslation {
            language: command.language,
            heading: "Translated",
            display_text: outcome.display_text(),
            outcome,
        })
    } else {
        None
    };

    let stored_translation = translation
        .as_ref()
        .and_then(|t| t.outcome.translated().map(|text| (t.language, text.to_owned())));

    let record = PalaceRecord {
        id: Uuid::now_v7(),
        owner_id: command.owner_id.clone(),
        topic: topic.to_owned(),
        location: location.to_owned(),
        scene_text,
        translated_scene_text: stored_translation
            .as_ref()
            .map(|(_, text)| text.clone())
            .unwrap_or_default(),
        translation_language: stored_translation.map(|(language, _)| language),
        created_at: clock.now(),
    };

    palaces.append(&record).await?;

    info!(
        correlation_id = %command.correlation_id(),
        user_id = %record.owner_id,
        palace_id = %record.id,
        language = %command.language,
        "palace generated"
    );

    Ok(GeneratedPalace {
        record,
        scene_heading: "English",
        translation,
    })
}
