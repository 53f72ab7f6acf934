//! Services for lakbay-server
//!
//! Provider clients, caches, and the content resolution pipeline.

pub mod content_resolver;
pub mod fallback_memory;
pub mod gemini_client;
pub mod image_cache;
pub mod rate_gate;
pub mod unsplash_client;
pub mod view_tracker;
pub mod wikipedia_client;

pub use content_resolver::{ContentFlags, ContentResolver, EnrichedContent};
pub use fallback_memory::FallbackMemory;
pub use gemini_client::{GeminiClient, GeminiError};
pub use image_cache::{CachedImage, ImageCache, ImageProxy};
pub use rate_gate::{RateGate, RateStatus};
pub use unsplash_client::{UnsplashClient, UnsplashError};
pub use view_tracker::{UnknownViewSlot, ViewSlot, ViewTicket, ViewTracker};
pub use wikipedia_client::{WikipediaClient, WikipediaError};
