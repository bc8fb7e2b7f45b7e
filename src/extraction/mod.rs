//! Relationship Extraction
//!
//! Segments text into sentences and runs an ordered list of independent
//! surface patterns over each one. Every match from every pattern becomes an
//! edge; overlapping matches between patterns are not reconciled.

pub mod patterns;

use crate::error::ExtractionError;
use crate::graph::{GraphBuilder, GraphResult, Relationship};
use regex::{Captures, Regex};

// =============================================================================
// Traits
// =============================================================================

/// A recognizer for one surface phrasing of "X relates to Y".
pub trait RelationPattern: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The compiled match expression, or `None` if it failed to compile.
    fn regex(&self) -> Option<&Regex>;

    /// Turn one match into a raw relationship.
    fn capture(&self, caps: &Captures<'_>) -> Result<Relationship, ExtractionError>;
}

/// Strategy for extracting a relationship graph from text.
pub trait RelationshipExtractor: Send + Sync {
    /// Extract the graph induced by `text`.
    fn extract(&self, text: &str) -> GraphResult;

    /// Get the name of this extraction strategy.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Pattern Extractor
// =============================================================================

/// Extractor driven by an ordered list of [`RelationPattern`]s.
#[derive(Debug)]
pub struct PatternExtractor {
    patterns: Vec<Box<dyn RelationPattern>>,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(patterns::builtin())
    }
}

impl PatternExtractor {
    /// Create an extractor applying `patterns` in the given priority order.
    pub fn new(patterns: Vec<Box<dyn RelationPattern>>) -> Self {
        Self { patterns }
    }

    fn scan_sentence(&self, sentence: &str, graph: &mut GraphBuilder) {
        for pattern in &self.patterns {
            let Some(re) = pattern.regex() else { continue };

            for caps in re.captures_iter(sentence) {
                match pattern.capture(&caps) {
                    Ok(relationship) => {
                        graph.push(relationship);
                    }
                    Err(e) => {
                        let matched = caps.get(0).map_or("", |m| m.as_str());
                        tracing::warn!(
                            name: "extraction.match_failed",
                            pattern = pattern.name(),
                            matched = %matched,
                            error = %e,
                            "Failed to process relationship match"
                        );
                    }
                }
            }
        }
    }
}

impl RelationshipExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> GraphResult {
        if text.is_empty() {
            return GraphResult::empty();
        }

        let mut graph = GraphBuilder::new();
        for sentence in sentences(text) {
            self.scan_sentence(sentence, &mut graph);
        }

        graph.build()
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Split text on `.`, `;` and newlines, yielding trimmed non-empty sentences.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Extract with the built-in patterns. `None` yields an empty graph.
pub fn extract_relationships(text: Option<&str>) -> GraphResult {
    match text {
        Some(text) => PatternExtractor::default().extract(text),
        None => GraphResult::empty(),
    }
}

// =============================================================================
// Tests
// =============================================================================
