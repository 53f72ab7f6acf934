//! Content resolution pipeline
//!
//! For one destination, finds a photo and a short description. Every
//! provider failure degrades to "less content": a fallback photo, then no
//! photo, and no description. Nothing in here returns an error to the
//! caller.
//!
//! Image and description are resolved concurrently. Within the description
//! branch, providers are tried one after the other in priority order.

use crate::services::fallback_memory::FallbackMemory;
use crate::services::rate_gate::RateGate;
use crate::types::{ConfigSource, Photo, PhotoProvider, RandomSource, TextDescription, TextProvider};
use lakbay_common::config::FeatureConfig;
use lakbay_common::kv::{get_parsed, KeyValueStore, KEY_FAST_MODE, KEY_PRIORITIZE_GEMINI};
use lakbay_quiz::{Destination, IslandGroup};
use serde::Serialize;
use std::sync::Arc;

/// Photo ids that search returns for Philippine queries but depict
/// somewhere else or nothing recognizable
pub const BLOCKED_PHOTO_IDS: &[&str] = &[
    "Yd59eQJVYAo",
    "gjrs3Pt4LiE",
    "pjAH2Ax4uWk",
    "sMQiL_2v4vs",
    "1JJJIHh7-Mk",
];

/// Candidates requested for the environment query
pub const FALLBACK_CANDIDATES: u8 = 10;

const FAST_MODE_PHOTO_ID: &str = "fast-mode-default";
const FAST_MODE_PHOTO_URL: &str =
    "https://images.unsplash.com/photo-1518509562904-e7ef99cdcc86?w=1080&q=80";

/// Fixed image shown in fast mode
pub fn fast_mode_photo() -> Photo {
    Photo {
        id: FAST_MODE_PHOTO_ID.to_string(),
        url: FAST_MODE_PHOTO_URL.to_string(),
        alt_text: Some("Tropical beach in the Philippines".to_string()),
        photographer_name: "Unsplash".to_string(),
        photographer_username: "unsplash".to_string(),
        photographer_profile_url: "https://unsplash.com/@unsplash".to_string(),
        download_location: None,
    }
}

/// Effective content flags after applying local overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentFlags {
    pub fast_mode: bool,
    pub prioritize_gemini: bool,
}

impl ContentFlags {
    /// Local override first, remote config when the local key is unset
    ///
    /// The remote source is only contacted if some flag lacks a local value;
    /// a remote failure reads as all flags off.
    pub async fn resolve(store: &dyn KeyValueStore, remote: &dyn ConfigSource) -> Self {
        let fast_mode = local_flag(store, KEY_FAST_MODE).await;
        let prioritize_gemini = local_flag(store, KEY_PRIORITIZE_GEMINI).await;

        let remote_flags = if fast_mode.is_none() || prioritize_gemini.is_none() {
            match remote.fetch().await {
                Ok(flags) => flags,
                Err(e) => {
                    tracing::warn!("Remote config unavailable, flags default off: {}", e);
                    FeatureConfig::default()
                }
            }
        } else {
            FeatureConfig::default()
        };

        Self {
            fast_mode: fast_mode.unwrap_or(remote_flags.fast_mode_default),
            prioritize_gemini: prioritize_gemini.unwrap_or(remote_flags.prioritize_gemini),
        }
    }
}

async fn local_flag(store: &dyn KeyValueStore, key: &str) -> Option<bool> {
    match get_parsed::<bool>(store, key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key, "Ignoring unreadable local flag: {}", e);
            None
        }
    }
}

/// How the image was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    FastMode,
    NamedSearch,
    EnvironmentSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub photo: Photo,
    pub source: ImageSource,
    /// Generic rather than destination-specific; shown with a disclaimer
    pub is_fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedDescription {
    pub text: Option<TextDescription>,
    /// Provider that produced `text`
    pub provider: Option<&'static str>,
    /// Skipped because the request budget is spent
    pub rate_limited: bool,
}

/// Everything resolved for one destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedContent {
    pub destination_id: String,
    /// `None` means the client should show its bundled default image
    pub image: Option<ResolvedImage>,
    pub description: ResolvedDescription,
    pub fast_mode: bool,
}

/// Query used when the named search finds nothing
///
/// Luzon is left out of the query: combined with an environment word it
/// pulls in unrelated photos.
pub fn fallback_query(destination: &Destination) -> String {
    let environment = destination
        .primary_environment()
        .map(|e| e.as_str())
        .unwrap_or("travel");

    match destination.island {
        IslandGroup::Luzon | IslandGroup::Any => format!("{} philippines", environment),
        island => format!("{} {} philippines", island.as_str(), environment),
    }
}

/// Candidates not blocked and not recently used; blocked-only if that
/// leaves nothing
pub fn filter_candidates(candidates: Vec<Photo>, recent: &[String]) -> Vec<Photo> {
    let allowed: Vec<Photo> = candidates
        .into_iter()
        .filter(|p| !BLOCKED_PHOTO_IDS.contains(&p.id.as_str()))
        .collect();

    let fresh: Vec<Photo> = allowed
        .iter()
        .filter(|p| !recent.contains(&p.id))
        .cloned()
        .collect();

    if fresh.is_empty() {
        allowed
    } else {
        fresh
    }
}

pub struct ContentResolver {
    photos: Arc<dyn PhotoProvider>,
    gemini: Arc<dyn TextProvider>,
    wikipedia: Arc<dyn TextProvider>,
    config: Arc<dyn ConfigSource>,
    store: Arc<dyn KeyValueStore>,
    random: Arc<dyn RandomSource>,
    gate: Arc<RateGate>,
    fallback_memory: FallbackMemory,
}

impl ContentResolver {
    pub fn new(
        photos: Arc<dyn PhotoProvider>,
        gemini: Arc<dyn TextProvider>,
        wikipedia: Arc<dyn TextProvider>,
        config: Arc<dyn ConfigSource>,
        store: Arc<dyn KeyValueStore>,
        random: Arc<dyn RandomSource>,
        gate: Arc<RateGate>,
    ) -> Self {
        Self {
            fallback_memory: FallbackMemory::new(store.clone()),
            photos,
            gemini,
            wikipedia,
            config,
            store,
            random,
            gate,
        }
    }

    pub async fn flags(&self) -> ContentFlags {
        ContentFlags::resolve(self.store.as_ref(), self.config.as_ref()).await
    }

    /// Resolve image and description for a destination
    pub async fn resolve(&self, destination: &Destination, activity_hint: &str) -> EnrichedContent {
        let flags = self.flags().await;

        let (image, description) = tokio::join!(
            self.resolve_image(destination, flags),
            self.resolve_description(destination, activity_hint, flags),
        );

        tracing::debug!(
            destination = %destination.id,
            image = ?image.as_ref().map(|i| i.source),
            description = ?description.provider,
            rate_limited = description.rate_limited,
            fast_mode = flags.fast_mode,
            "Content resolved"
        );

        EnrichedContent {
            destination_id: destination.id.clone(),
            image,
            description,
            fast_mode: flags.fast_mode,
        }
    }

    pub async fn resolve_image(
        &self,
        destination: &Destination,
        flags: ContentFlags,
    ) -> Option<ResolvedImage> {
        if flags.fast_mode {
            return Some(ResolvedImage {
                photo: fast_mode_photo(),
                source: ImageSource::FastMode,
                is_fallback: true,
            });
        }

        let name = destination.preferred_search_name();
        match self.photos.search(name, 1).await {
            Ok(photos) => {
                if let Some(photo) = photos.into_iter().next() {
                    self.spawn_usage_notification(&photo);
                    return Some(ResolvedImage {
                        photo,
                        source: ImageSource::NamedSearch,
                        is_fallback: false,
                    });
                }
                tracing::debug!(query = name, "Named photo search found nothing");
            }
            Err(e) => tracing::warn!(query = name, "Named photo search failed: {}", e),
        }

        self.resolve_fallback_image(destination).await
    }

    async fn resolve_fallback_image(&self, destination: &Destination) -> Option<ResolvedImage> {
        let query = fallback_query(destination);
        let candidates = match self.photos.search(&query, FALLBACK_CANDIDATES).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(query = %query, "Fallback photo search failed: {}", e);
                return None;
            }
        };

        let recent = self.fallback_memory.recent().await.unwrap_or_else(|e| {
            tracing::warn!("Fallback memory unavailable: {}", e);
            Vec::new()
        });

        let mut pool = filter_candidates(candidates, &recent);
        if pool.is_empty() {
            tracing::debug!(query = %query, "No usable fallback photo");
            return None;
        }

        let index = self.random.pick(pool.len()).min(pool.len() - 1);
        let photo = pool.swap_remove(index);

        if let Err(e) = self.fallback_memory.remember(&photo.id).await {
            tracing::warn!(photo = %photo.id, "Failed to remember fallback photo: {}", e);
        }

        Some(ResolvedImage {
            photo,
            source: ImageSource::EnvironmentSearch,
            is_fallback: true,
        })
    }

    /// Fire-and-forget download tracking
    fn spawn_usage_notification(&self, photo: &Photo) {
        let Some(location) = photo.download_location.clone() else {
            return;
        };
        let photos = self.photos.clone();
        tokio::spawn(async move {
            if let Err(e) = photos.notify_used(&location).await {
                tracing::warn!(download_location = %location, "Download tracking failed: {}", e);
            }
        });
    }

    pub async fn resolve_description(
        &self,
        destination: &Destination,
        activity_hint: &str,
        flags: ContentFlags,
    ) -> ResolvedDescription {
        if flags.fast_mode {
            return ResolvedDescription::default();
        }

        let reserved = match self.gate.try_reserve().await {
            Ok(Some(_)) => true,
            Ok(None) => {
                tracing::info!(destination = %destination.id, "Description skipped, request budget spent");
                return ResolvedDescription {
                    rate_limited: true,
                    ..ResolvedDescription::default()
                };
            }
            Err(e) => {
                tracing::warn!("Request budget unreadable, continuing: {}", e);
                false
            }
        };

        let providers: [&Arc<dyn TextProvider>; 2] = if flags.prioritize_gemini {
            [&self.gemini, &self.wikipedia]
        } else {
            [&self.wikipedia, &self.gemini]
        };

        for provider in providers {
            match provider.describe(&destination.name, activity_hint).await {
                Ok(text) if !text.description.trim().is_empty() => {
                    return ResolvedDescription {
                        text: Some(text),
                        provider: Some(provider.name()),
                        rate_limited: false,
                    };
                }
                Ok(_) => tracing::warn!(
                    provider = provider.name(),
                    destination = %destination.id,
                    "Empty description"
                ),
                Err(e) => tracing::warn!(
                    provider = provider.name(),
                    destination = %destination.id,
                    "Description failed: {}",
                    e
                ),
            }
        }

        if reserved {
            if let Err(e) = self.gate.release().await {
                tracing::warn!("Failed to return unused description request: {}", e);
            }
        }

        ResolvedDescription::default()
    }
}
