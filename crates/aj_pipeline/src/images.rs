use aj_core::ImageProvider;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

const CROP_PARAMS: &str = "&w=800&h=600&fit=crop";

/// Topic keywords mapped to enriched English search queries; the image
/// provider indexes English terms far better than the Uzbek topic text.
const QUERY_EXPANSIONS: &[(&str, &str)] = &[
    ("sun'iy intellekt", "artificial intelligence technology"),
    ("intellekt", "artificial intelligence robot"),
    ("blokcheyn", "blockchain cryptocurrency"),
    ("kvant", "quantum computer processor"),
    ("5g", "5g network telecommunications"),
    ("elektromobil", "electric vehicle charging"),
    ("kibertxavfsizlik", "cybersecurity lock screen"),
    ("kiberxavfsizlik", "cybersecurity lock screen"),
    ("iot", "internet of things sensors"),
    ("virtual reallik", "virtual reality headset"),
    ("to'lov", "digital payment fintech"),
    ("startap", "startup team office"),
    ("cloud", "cloud computing datacenter"),
    ("bulut", "cloud computing datacenter"),
    ("ma'lumot", "data analytics dashboard"),
    ("mobil", "smartphone mobile app"),
    ("kosmik", "space rocket launch"),
    ("biotexnologiya", "biotechnology laboratory"),
];

/// Category-keyed fallback pools. Selection within a pool is a stable
/// hash of the topic, so the same topic always maps to the same image.
const FALLBACK_POOLS: &[(&str, &[&str])] = &[
    (
        "intellekt",
        &[
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
            "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "blokcheyn",
        &[
            "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
            "https://images.unsplash.com/photo-1518709268805-4e9042af2176?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "startap",
        &[
            "https://images.unsplash.com/photo-1559136555-9303baea8ebd?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "kibertxavfsizlik",
        &[
            "https://images.unsplash.com/photo-1563013544-824ae1b704d3?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
            "https://images.unsplash.com/photo-1518709268805-4e9042af2176?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "elektromobil",
        &[
            "https://images.unsplash.com/photo-1449824913935-59a10b8d2000?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "kosmik",
        &[
            "https://images.unsplash.com/photo-1446776653964-20c1d3a81b06?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "bulut",
        &[
            "https://images.unsplash.com/photo-1544197150-b99a580bb7a8?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "cloud",
        &[
            "https://images.unsplash.com/photo-1544197150-b99a580bb7a8?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "mobil",
        &[
            "https://images.unsplash.com/photo-1512941937669-90a1b58e7e9c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
    (
        "ta'lim",
        &[
            "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
        ],
    ),
];

const DEFAULT_POOL: &[&str] = &[
    "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
    "https://images.unsplash.com/photo-1518709268805-4e9042af2176?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
    "https://images.unsplash.com/photo-1504384764586-bb4cdc1707b0?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
];

/// Enrich the raw topic into a provider-friendly query.
pub fn expand_query(topic: &str) -> String {
    let lower = topic.to_lowercase();
    for (keyword, query) in QUERY_EXPANSIONS {
        if lower.contains(keyword) {
            return query.to_string();
        }
    }
    format!("{} technology", lower)
}

fn stable_hash(topic: &str) -> u64 {
    let digest = Sha256::digest(topic.as_bytes());
    u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ])
}

/// Deterministic fallback: same topic, same URL, no randomness.
pub fn fallback_image(topic: &str) -> String {
    let lower = topic.to_lowercase();
    let pool = FALLBACK_POOLS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, pool)| *pool)
        .unwrap_or(DEFAULT_POOL);
    pool[(stable_hash(topic) % pool.len() as u64) as usize].to_string()
}

/// Maps a topic to a representative image URL. Provider failures and
/// empty result pages degrade to the deterministic fallback pools.
pub struct ImageResolver {
    provider: Arc<dyn ImageProvider>,
}

impl ImageResolver {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, topic: &str) -> Option<String> {
        let query = expand_query(topic);
        match self.provider.search(&query).await {
            Ok(results) if !results.is_empty() => {
                let chosen = results
                    .iter()
                    .find(|r| r.alt_text.is_some())
                    .unwrap_or(&results[0]);
                Some(format!("{}{}", chosen.url, CROP_PARAMS))
            }
            Ok(_) => {
                debug!(query = %query, "Image search returned nothing, using fallback pool");
                Some(fallback_image(topic))
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Image search failed, using fallback pool");
                Some(fallback_image(topic))
            }
        }
    }
}
