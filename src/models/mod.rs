use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub type UserId = Uuid;
pub type ContentId = i64;

// ============================================================================
// Ratings
// ============================================================================

/// Closed set of rating tiers a user can assign to watched content
///
/// Anything else stored in the rating column (sentinel "not rated" values,
/// legacy strings) parses to `None` and is excluded from analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    SS,
    S,
    A,
    B,
    C,
}

impl Rating {
    /// Parses a stored rating string; unknown values are excluded, not errors.
    pub fn parse(raw: &str) -> Option<Rating> {
        match raw.trim() {
            "SS" => Some(Rating::SS),
            "S" => Some(Rating::S),
            "A" => Some(Rating::A),
            "B" => Some(Rating::B),
            "C" => Some(Rating::C),
            _ => None,
        }
    }
}

/// Rating tier to aggregation weight mapping
///
/// Injectable so tests can use synthetic tables. The production default gives
/// SS a deliberately dominant weight: a single top-tier rating is meant to
/// pull the preference vector almost entirely toward that item.
#[derive(Debug, Clone)]
pub struct RatingWeights {
    weights: HashMap<Rating, f32>,
}

impl Default for RatingWeights {
    fn default() -> Self {
        let weights = HashMap::from([
            (Rating::SS, 50.0),
            (Rating::S, 1.8),
            (Rating::A, 1.0),
            (Rating::B, 0.3),
            (Rating::C, 0.1),
        ]);
        Self { weights }
    }
}

impl RatingWeights {
    pub fn new(weights: HashMap<Rating, f32>) -> Self {
        Self { weights }
    }

    /// Weight for an optional rating; unrated and unmapped tiers weigh zero.
    pub fn weight(&self, rating: Option<Rating>) -> f32 {
        rating
            .and_then(|r| self.weights.get(&r).copied())
            .unwrap_or(0.0)
    }
}

// ============================================================================
// Storage rows
// ============================================================================

/// One rated-history row used for attribute statistics
///
/// Rows without a stored embedding still count here.
#[derive(Debug, Clone)]
pub struct RatedEntry {
    pub content_type: Option<String>,
    pub season: Option<String>,
    pub rating: Option<Rating>,
}

/// One rated-history row from the embeddable subset
///
/// `embedding` is `None` when the stored text was absent or unparseable.
#[derive(Debug, Clone)]
pub struct EmbeddedEntry {
    pub embedding: Option<Vec<f32>>,
    pub rating: Option<Rating>,
}

/// A catalog item eligible for similarity ranking
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub content_id: ContentId,
    pub title: String,
    pub image: Option<String>,
    pub embedding: Vec<f32>,
}

// ============================================================================
// Analysis results
// ============================================================================

/// A vocabulary tag with its cached embedding
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A vocabulary tag scored against a preference vector
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagScore {
    pub text: String,
    pub score: f32,
}

/// Weighted histogram per category ("contentType", "season", ...)
pub type AttributeSummary = HashMap<String, HashMap<String, f32>>;

/// A user's derived taste profile
///
/// Recomputed per request; an empty `user_preference_vector` means the user
/// has no qualifying rated history, which is distinct from "zero similarity
/// to everything".
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceProfile {
    pub keyword_analysis: Vec<TagScore>,
    pub attribute_analysis: AttributeSummary,
    pub user_preference_vector: Vec<f32>,
    pub generated_at: DateTime<Utc>,
}

impl PreferenceProfile {
    pub fn has_signal(&self) -> bool {
        !self.user_preference_vector.is_empty()
    }
}

/// A catalog item with its similarity to a reference vector attached
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredContent {
    pub content_id: ContentId,
    pub title: String,
    pub image: Option<String>,
    pub similarity: f32,
}

/// Predicted fit of an arbitrary description against a user's taste
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingPrediction {
    /// Integer score in 0..=100
    pub prediction: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RatingPrediction {
    /// Neutral result for users without qualifying rated history.
    pub fn insufficient_data() -> Self {
        Self {
            prediction: 0,
            message: Some("insufficient data".to_string()),
        }
    }

    /// Projects a cosine similarity onto the 0..=100 scale.
    pub fn from_similarity(similarity: f32) -> Self {
        let prediction = (similarity.clamp(0.0, 1.0) * 100.0).round() as u8;
        Self {
            prediction,
            message: None,
        }
    }
}
