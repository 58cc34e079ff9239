//! Headline sentiment scoring.
//!
//! A `PolarityModel` rates one snippet in `[-1, 1]`; `SentimentScorer` averages
//! those ratings over every headline. The scorer never touches the network:
//! headline fetch failures arrive here as an empty slice.

use std::collections::HashMap;

use statrs::statistics::Statistics;

use crate::config::SENTIMENT;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Aggregate tone of a set of headlines, clamped to `[-1, 1]`. `0.0` is neutral.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SentimentScore(f64);

impl SentimentScore {
    pub const NEUTRAL: SentimentScore = SentimentScore(0.0);

    /// Clamps into range. A non-finite value collapses to neutral.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        SentimentScore(value.clamp(-1.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn level(&self) -> SentimentLevel {
        if self.0 > SENTIMENT.neutral_band {
            SentimentLevel::Bullish
        } else if self.0 < -SENTIMENT.neutral_band {
            SentimentLevel::Bearish
        } else {
            SentimentLevel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SentimentLevel {
    Bearish,
    Neutral,
    Bullish,
}

/// Rates a single text snippet in `[-1, 1]`.
pub trait PolarityModel: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

const NEGATION_FACTOR: f64 = -0.5;

/// Word-weight lexicon tuned for market headlines.
///
/// A negation flips (and damps) the next scored word; an intensifier scales it.
/// Snippet polarity is the mean of its scored words, 0 when none match.
pub struct FinancialLexicon {
    words: HashMap<&'static str, f64>,
    negations: &'static [&'static str],
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for FinancialLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialLexicon {
    pub fn new() -> Self {
        let positive: &[(&str, f64)] = &[
            ("bullish", 0.8),
            ("surge", 0.7),
            ("rally", 0.7),
            ("soar", 0.8),
            ("gain", 0.5),
            ("profit", 0.6),
            ("growth", 0.6),
            ("rise", 0.5),
            ("jump", 0.6),
            ("climb", 0.5),
            ("improve", 0.5),
            ("outperform", 0.7),
            ("beat", 0.6),
            ("exceed", 0.6),
            ("strong", 0.5),
            ("positive", 0.5),
            ("optimistic", 0.6),
            ("record", 0.6),
            ("upgrade", 0.6),
            ("buy", 0.5),
            ("breakout", 0.6),
            ("recovery", 0.5),
            ("rebound", 0.5),
            ("good", 0.6),
            ("great", 0.8),
            ("excellent", 1.0),
        ];
        let negative: &[(&str, f64)] = &[
            ("bearish", -0.8),
            ("crash", -0.9),
            ("plunge", -0.8),
            ("tumble", -0.7),
            ("drop", -0.6),
            ("fall", -0.5),
            ("slump", -0.7),
            ("decline", -0.6),
            ("loss", -0.6),
            ("weak", -0.5),
            ("negative", -0.5),
            ("pessimistic", -0.6),
            ("concern", -0.5),
            ("fear", -0.6),
            ("miss", -0.6),
            ("disappoint", -0.7),
            ("underperform", -0.6),
            ("downgrade", -0.6),
            ("sell", -0.5),
            ("lawsuit", -0.6),
            ("recall", -0.5),
            ("crisis", -0.8),
            ("warning", -0.5),
            ("fraud", -0.9),
            ("bad", -0.7),
            ("terrible", -1.0),
        ];

        let intensifiers = HashMap::from([
            ("very", 1.3),
            ("extremely", 1.5),
            ("highly", 1.3),
            ("sharply", 1.4),
            ("significantly", 1.3),
            ("slightly", 0.5),
            ("somewhat", 0.7),
        ]);

        Self {
            words: positive.iter().chain(negative.iter()).copied().collect(),
            negations: &[
                "not", "no", "never", "without", "cannot", "can't", "don't", "doesn't",
                "didn't", "won't", "isn't", "aren't", "wasn't", "hardly",
            ],
            intensifiers,
        }
    }

    /// Exact match first, then common inflections ("surges", "jumped", "falling").
    fn word_score(&self, word: &str) -> Option<f64> {
        if let Some(score) = self.words.get(word) {
            return Some(*score);
        }
        ["s", "es", "ed", "d", "ing"]
            .iter()
            .filter_map(|suffix| word.strip_suffix(suffix))
            .find_map(|stem| self.words.get(stem).copied())
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word)
    }
}

impl PolarityModel for FinancialLexicon {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty());

        let mut scored: Vec<f64> = Vec::new();
        let mut modifier = 1.0;
        for token in tokens {
            if self.is_negation(token) {
                modifier *= NEGATION_FACTOR;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(token) {
                modifier *= factor;
                continue;
            }
            if let Some(score) = self.word_score(token) {
                scored.push(score * modifier);
                modifier = 1.0;
            }
        }

        if scored.is_empty() {
            return 0.0;
        }
        scored.iter().mean().clamp(-1.0, 1.0)
    }
}

/// Averages snippet polarity over a list of headlines.
pub struct SentimentScorer<M: PolarityModel = FinancialLexicon> {
    model: M,
}

impl Default for SentimentScorer<FinancialLexicon> {
    fn default() -> Self {
        Self::new(FinancialLexicon::new())
    }
}

impl<M: PolarityModel> SentimentScorer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Mean polarity of `headlines`. Empty input is neutral, not an error.
    pub fn score<S: AsRef<str>>(&self, headlines: &[S]) -> SentimentScore {
        if headlines.is_empty() {
            return SentimentScore::NEUTRAL;
        }

        let polarities: Vec<f64> = headlines
            .iter()
            .map(|headline| {
                let polarity = self.model.polarity(headline.as_ref());
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_headline_scores {
                    log::info!("{:+.3}  {}", polarity, headline.as_ref());
                }
                polarity
            })
            .collect();

        SentimentScore::new(polarities.iter().mean())
    }
}
