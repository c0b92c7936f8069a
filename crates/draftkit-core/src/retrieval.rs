//! Conversion of vector-search hits into citations
//!
//! The search service returns chunks ranked by distance. Distances become
//! relevance scores with `1 / (1 + distance)`, weak hits are dropped and the
//! survivors become the citations offered to generation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::citation::Citation;
use crate::config::RetrievalConfig;

/// Metadata stored with each chunk in the vector index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitMetadata {
    pub document_id: String,
    pub document_title: String,
    pub page_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
}

/// One ranked result from the vector search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    pub metadata: HitMetadata,
    /// Distance to the query; smaller is closer
    pub distance: f64,
    /// Id of the chunk in the index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Map a distance onto (0, 1]. Negative distances are treated as 0.
pub fn relevance_from_distance(distance: f64) -> f64 {
    1.0 / (1.0 + distance.max(0.0))
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Turn ranked hits into citations.
///
/// Keeps the service's order, drops hits scoring below
/// `min_relevance_score` and stops after `top_k` citations.
pub fn citations_from_hits(hits: &[SearchHit], config: &RetrievalConfig) -> Vec<Citation> {
    let mut citations = Vec::new();

    for (rank, hit) in hits.iter().enumerate() {
        if citations.len() >= config.top_k {
            break;
        }

        let score = relevance_from_distance(hit.distance);
        if score < config.min_relevance_score {
            debug!(
                rank = rank + 1,
                score,
                threshold = config.min_relevance_score,
                title = %hit.metadata.document_title,
                "skipping low-relevance hit"
            );
            continue;
        }

        citations.push(Citation {
            document_id: hit.metadata.document_id.clone(),
            document_title: hit.metadata.document_title.clone(),
            page_number: hit.metadata.page_number,
            chunk_text: hit.text.clone(),
            chunk_id: hit.id.clone(),
            relevance_score: Some(round_score(score)),
        });
    }

    if citations.is_empty() && !hits.is_empty() {
        debug!(hits = hits.len(), "no hit passed the relevance threshold");
    }
    citations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, page: u32, distance: f64) -> SearchHit {
        SearchHit {
            text: format!("{title} p{page}"),
            metadata: HitMetadata {
                document_id: format!("id-{title}"),
                document_title: title.to_string(),
                page_number: page,
                chunk_index: None,
            },
            distance,
            id: None,
        }
    }

    #[test]
    fn test_relevance_from_distance() {
        assert_eq!(relevance_from_distance(0.0), 1.0);
        assert_eq!(relevance_from_distance(1.0), 0.5);
        assert_eq!(relevance_from_distance(3.0), 0.25);
        assert_eq!(relevance_from_distance(-2.0), 1.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = RetrievalConfig {
            top_k: 10,
            min_relevance_score: 0.25,
        };
        let hits = vec![hit("A", 1, 3.0), hit("B", 1, 3.5)];
        let citations = citations_from_hits(&hits, &config);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].document_title, "A");
        assert_eq!(citations[0].relevance_score, Some(0.25));
    }

    #[test]
    fn test_order_kept_and_top_k_applied() {
        let config = RetrievalConfig {
            top_k: 2,
            min_relevance_score: 0.1,
        };
        let hits = vec![
            hit("A", 1, 0.2),
            hit("B", 2, 50.0),
            hit("C", 3, 0.4),
            hit("D", 4, 0.1),
        ];
        let titles: Vec<_> = citations_from_hits(&hits, &config)
            .into_iter()
            .map(|c| c.document_title)
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_scores_rounded_to_three_places() {
        let config = RetrievalConfig::default();
        let citations = citations_from_hits(&[hit("A", 2, 0.5)], &config);
        assert_eq!(citations[0].relevance_score, Some(0.667));
        assert_eq!(citations[0].page_number, 2);
        assert_eq!(citations[0].chunk_text, "A p2");
    }

    #[test]
    fn test_hit_json_shape() {
        let json = r#"{
            "text": "Enrollment grew 14%.",
            "metadata": {"document_id": "d1", "document_title": "Report.pdf", "page_number": 7, "chunk_index": 3},
            "distance": 0.25
        }"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.metadata.chunk_index, Some(3));
        assert_eq!(hit.id, None);
        let citations = citations_from_hits(&[hit], &RetrievalConfig::default());
        assert_eq!(citations[0].relevance_score, Some(0.8));
    }
}
