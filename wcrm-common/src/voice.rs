//! Transcript parsing for the voice workflow
//!
//! Speech-to-text itself is out of scope (the recording flow stubs it);
//! this module turns an already-transcribed field note into structured
//! data using the industry's voice-parsing keyword lists. Sentences that
//! mention time keywords become labor billing items, part keywords become
//! parts items, follow-up keywords become tasks, and everything else is
//! kept as job notes.

use serde::{Deserialize, Serialize};

use crate::industry::VoiceParsingConfig;

/// Billing item extracted from a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBillingItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    pub item_type: String,
}

/// Structured result of parsing one transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedTranscript {
    pub billing_items: Vec<ParsedBillingItem>,
    pub tasks: Vec<String>,
    pub job_notes: String,
}

/// Parse a transcript against the industry keyword lists
///
/// `hourly_rate` prices labor items when known (from the membership);
/// parts items are always extracted at zero price for later editing.
pub fn parse_transcript(
    config: &VoiceParsingConfig,
    transcript: &str,
    hourly_rate: Option<f64>,
) -> ParsedTranscript {
    let mut parsed = ParsedTranscript::default();
    let mut notes: Vec<&str> = Vec::new();

    for sentence in split_sentences(transcript) {
        let lower = sentence.to_lowercase();

        if contains_any(&lower, &config.followup_keywords) {
            parsed.tasks.push(sentence.to_string());
        } else if contains_any(&lower, &config.time_keywords) {
            let quantity = leading_quantity(&lower).unwrap_or(1.0);
            let unit_price = hourly_rate.unwrap_or(0.0);
            parsed.billing_items.push(ParsedBillingItem {
                description: sentence.to_string(),
                quantity,
                unit_price,
                total: quantity * unit_price,
                item_type: "labor".to_string(),
            });
        } else if contains_any(&lower, &config.part_keywords) {
            let quantity = leading_quantity(&lower).unwrap_or(1.0);
            parsed.billing_items.push(ParsedBillingItem {
                description: sentence.to_string(),
                quantity,
                unit_price: 0.0,
                total: 0.0,
                item_type: "parts".to_string(),
            });
        } else {
            notes.push(sentence);
        }
    }

    parsed.job_notes = notes.join(". ");
    parsed
}

fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn contains_any(sentence: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| sentence.contains(k.as_str()))
}

/// First numeric token in the sentence ("2 hours", "3.5 hours of labor")
fn leading_quantity(sentence: &str) -> Option<f64> {
    sentence
        .split_whitespace()
        .find_map(|token| token.parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VoiceParsingConfig {
        VoiceParsingConfig {
            time_keywords: vec!["hour".into(), "hours".into()],
            part_keywords: vec!["part".into(), "parts".into(), "material".into()],
            followup_keywords: vec!["follow up".into(), "come back".into()],
        }
    }

    #[test]
    fn time_sentence_becomes_priced_labor_item() {
        let parsed = parse_transcript(&config(), "Spent 2 hours on the water heater.", Some(75.0));
        assert_eq!(parsed.billing_items.len(), 1);
        let item = &parsed.billing_items[0];
        assert_eq!(item.item_type, "labor");
        assert_eq!(item.quantity, 2.0);
        assert_eq!(item.total, 150.0);
    }

    #[test]
    fn part_sentence_becomes_unpriced_parts_item() {
        let parsed = parse_transcript(&config(), "Used 3 parts from the truck", None);
        assert_eq!(parsed.billing_items.len(), 1);
        assert_eq!(parsed.billing_items[0].item_type, "parts");
        assert_eq!(parsed.billing_items[0].quantity, 3.0);
        assert_eq!(parsed.billing_items[0].unit_price, 0.0);
    }

    #[test]
    fn followup_sentence_becomes_task() {
        let parsed = parse_transcript(
            &config(),
            "Need to come back Tuesday for the inspection.",
            None,
        );
        assert!(parsed.billing_items.is_empty());
        assert_eq!(parsed.tasks.len(), 1);
    }

    #[test]
    fn unmatched_sentences_collect_as_notes() {
        let parsed = parse_transcript(
            &config(),
            "Customer was happy with the work. Spent 1 hour cleaning up.",
            None,
        );
        assert_eq!(parsed.job_notes, "Customer was happy with the work");
        assert_eq!(parsed.billing_items.len(), 1);
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let parsed = parse_transcript(&config(), "billed an hour on site", Some(50.0));
        assert_eq!(parsed.billing_items[0].quantity, 1.0);
        assert_eq!(parsed.billing_items[0].total, 50.0);
    }
}
