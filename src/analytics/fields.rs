//! Dynamic-field answer parsing and value-frequency distribution.
//!
//! Registrant answers to organization-defined custom questions arrive
//! as one serialized blob per registration: zero or more
//! `"<field_id>: <value>"` lines. The tokenizer here recovers typed
//! `(field_id, value)` pairs up front; the distribution step then works
//! on structured data instead of string-splitting inside the analytics.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::{FieldDefinition, Registration};

/// Synthetic bucket counting registrants who gave no answer for a field.
const UNDEFINED_BUCKET: &str = "undefined";

/// Distribution filter bounds: a field is chartable only when it has
/// more than one and at most this many distinct values.
const MAX_DISTINCT_VALUES: usize = 20;

/// One parsed answer: which field, and the trimmed raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnswer {
    /// Field id as referenced in the blob.
    pub field_id: u64,
    /// Whitespace-trimmed answer text, possibly empty.
    pub value: String,
}

/// Per-field value distributions for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDistribution {
    /// Every field label, id ascending — including fields filtered out
    /// of `distribution`, so callers can tell "field exists" from
    /// "field is chartable".
    pub labels: Vec<String>,
    /// Label → (answer value → occurrence count), only for fields that
    /// pass the distinct-value filter.
    pub distribution: BTreeMap<String, BTreeMap<String, u64>>,
}

/// Tokenizes one serialized answer blob into typed pairs.
///
/// Per line, the first `:` immediately preceded by a digit run yields a
/// pair: the digit run is the field id, the rest of the line (trimmed)
/// is the value. Lines with no such pair — no colon, or a non-numeric
/// key — are skipped, never errors.
#[must_use]
pub fn parse_answer_blob(blob: &str) -> Vec<FieldAnswer> {
    blob.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<FieldAnswer> {
    for (idx, _) in line.match_indices(':') {
        let (before, rest) = line.split_at(idx);
        let digit_len = before
            .chars()
            .rev()
            .take_while(char::is_ascii_digit)
            .count();
        if digit_len == 0 {
            continue;
        }
        // The counted digits are ASCII, one byte each.
        let (_, digits) = before.split_at(before.len() - digit_len);
        let Ok(field_id) = digits.parse::<u64>() else {
            continue;
        };
        let value = rest.strip_prefix(':').unwrap_or(rest).trim();
        return Some(FieldAnswer {
            field_id,
            value: value.to_string(),
        });
    }
    None
}

/// Computes per-field answer distributions across an event's
/// registrants.
///
/// Answers referencing field ids not defined for this event are
/// discarded (blobs may carry fields from other forms). Each field gets
/// an `"undefined"` bucket for registrants who supplied no answer,
/// included only when positive. Fields with a single distinct value or
/// more than twenty (including `undefined`) are dropped from
/// `distribution` — a constant answer or free text carries no chart
/// signal — but stay listed in `labels`.
#[must_use]
pub fn field_distribution(
    fields: &[FieldDefinition],
    registrations: &[Registration],
) -> FieldDistribution {
    if fields.is_empty() {
        return FieldDistribution::default();
    }

    let labels: Vec<String> = fields.iter().map(|f| f.label.clone()).collect();
    if registrations.is_empty() {
        return FieldDistribution {
            labels,
            distribution: BTreeMap::new(),
        };
    }

    let known: HashSet<u64> = fields.iter().map(|f| f.id).collect();
    let mut counts_by_field: HashMap<u64, BTreeMap<String, u64>> = HashMap::new();
    for reg in registrations {
        for answer in parse_answer_blob(&reg.answers_serial) {
            if known.contains(&answer.field_id) {
                *counts_by_field
                    .entry(answer.field_id)
                    .or_default()
                    .entry(answer.value)
                    .or_insert(0) += 1;
            }
        }
    }

    let total_registrants = registrations.len() as i64;
    let mut distribution = BTreeMap::new();
    for field in fields {
        let mut counts = counts_by_field.remove(&field.id).unwrap_or_default();
        let matched: u64 = counts.values().sum();
        let undefined = total_registrants - matched as i64;
        if undefined > 0 {
            counts.insert(UNDEFINED_BUCKET.to_string(), undefined as u64);
        }
        let distinct = counts.len();
        if distinct > 1 && distinct <= MAX_DISTINCT_VALUES {
            distribution.insert(field.label.clone(), counts);
        }
    }

    FieldDistribution {
        labels,
        distribution,
    }
}
