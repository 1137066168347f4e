//! Presets offered by this deployment.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use palace_core::catalog::LocationPreset;
use palace_core::language::LanguageCode;
use palace_core::profile::Profession;
use serde::Serialize;

use crate::state::AppState;

/// A selectable language.
#[derive(Debug, Serialize)]
pub struct LanguageEntry {
    pub code: LanguageCode,
    pub name: &'static str,
}

/// A preset palace location.
#[derive(Debug, Serialize)]
pub struct LocationEntry {
    pub id: LocationPreset,
    pub label: &'static str,
}

/// A selectable avatar.
#[derive(Debug, Serialize)]
pub struct AvatarEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub url: String,
}

/// Response body for GET /catalog.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub languages: Vec<LanguageEntry>,
    pub locations: Vec<LocationEntry>,
    pub avatars: Vec<AvatarEntry>,
    pub professions: [Profession; 3],
}

/// GET /catalog
async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        languages: state
            .catalog
            .languages()
            .iter()
            .map(|&code| LanguageEntry {
                code,
                name: code.display_name(),
            })
            .collect(),
        locations: LocationPreset::ALL
            .into_iter()
            .map(|id| LocationEntry {
                id,
                label: id.label(),
            })
            .collect(),
        avatars: state
            .catalog
            .avatars()
            .iter()
            .map(|&avatar| AvatarEntry {
                id: avatar.seed(),
                label: avatar.label(),
                url: avatar.url(),
            })
            .collect(),
        professions: [
            Profession::Student,
            Profession::Professional,
            Profession::Other,
        ],
    })
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new().route("/catalog", get(get_catalog))
}
