use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{models::Tag, services::embedding::EmbeddingService};

/// Curated descriptive vocabulary ranked against user preference vectors.
/// Fixed for the process lifetime; embeddings are computed once and cached.
const TAG_VOCABULARY: &[&str] = &[
    "action",
    "adventure",
    "comedy",
    "drama",
    "fantasy",
    "science fiction",
    "romance",
    "mystery",
    "thriller",
    "horror",
    "slice of life",
    "sports",
    "music",
    "mecha",
    "isekai",
    "supernatural",
    "psychological",
    "historical",
    "military",
    "school life",
    "coming of age",
    "found family",
    "revenge",
    "redemption",
    "survival",
    "time travel",
    "space opera",
    "cyberpunk",
    "steampunk",
    "post-apocalyptic",
    "dystopian",
    "magical girl",
    "martial arts",
    "superpowers",
    "vampires",
    "zombies",
    "demons",
    "gods and mythology",
    "pirates",
    "samurai",
    "ninja",
    "detective",
    "heist",
    "courtroom",
    "medical",
    "cooking",
    "gambling",
    "idol",
    "workplace",
    "politics",
    "war",
    "tragedy",
    "dark fantasy",
    "high fantasy",
    "urban fantasy",
    "fairy tale",
    "parody",
    "satire",
    "absurdist humor",
    "wholesome",
    "heartwarming",
    "melancholic",
    "bittersweet",
    "tearjerker",
    "feel-good",
    "tense",
    "suspenseful",
    "atmospheric",
    "slow burn",
    "fast paced",
    "episodic",
    "ensemble cast",
    "antihero",
    "strong female lead",
    "rivalries",
    "tournament arc",
    "underdog story",
    "forbidden love",
    "love triangle",
    "childhood friends",
    "monsters",
    "dragons",
    "magic academy",
    "dungeon crawling",
    "guilds",
    "kingdom building",
    "strategy",
    "mind games",
    "philosophical",
    "existential",
    "artificial intelligence",
    "virtual reality",
    "aliens",
    "mutants",
    "espionage",
    "conspiracy",
    "crime syndicate",
    "road trip",
    "seafaring",
    "wilderness",
    "small town",
    "big city",
];

/// Process-wide tag vocabulary cache
///
/// Lazily initialized on first use through a compute-once cell, so concurrent
/// first requests share one embedding pass instead of racing an unguarded
/// global. Partial embedding failures are cached as empty vectors as-is and
/// never retried; the only reset is a process restart.
pub struct TagCache {
    cell: OnceCell<Arc<Vec<Tag>>>,
}

impl Default for TagCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TagCache {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The full vocabulary with cached embeddings, populating it on first use.
    pub async fn all(&self, embeddings: &EmbeddingService) -> Arc<Vec<Tag>> {
        self.cell
            .get_or_init(|| async {
                let texts: Vec<String> =
                    TAG_VOCABULARY.iter().map(|tag| tag.to_string()).collect();
                let vectors = embeddings.embed_batch(&texts).await;

                let tags: Vec<Tag> = texts
                    .into_iter()
                    .zip(vectors)
                    .map(|(text, embedding)| Tag { text, embedding })
                    .collect();

                let populated = tags.iter().filter(|t| !t.embedding.is_empty()).count();
                tracing::info!(total = tags.len(), populated, "Tag vocabulary embedded");

                Arc::new(tags)
            })
            .await
            .clone()
    }

    /// Tags whose cached embedding is usable for ranking.
    pub async fn valid(&self, embeddings: &EmbeddingService) -> Vec<Tag> {
        self.all(embeddings)
            .await
            .iter()
            .filter(|tag| !tag.embedding.is_empty())
            .cloned()
            .collect()
    }
}
