//! JSON rule and inventory files.
//!
//! This module confines every wire-format concern: the loosely-keyed rule
//! records (optional `conditions`, `first`, `last`, `before`, `after` keys
//! and an `applies` bundle) and the symbol/diacritic tables that make up an
//! inventory. Reading validates shape and converts into the strict crate
//! types; writing performs the inverse conversion.
//!
//! Deletion travels on the wire as the literal feature label `"deletion"`
//! inside `applies.positive`. That sentinel never escapes this module: it
//! is translated to [`Transform::Delete`] on the way in and regenerated on
//! the way out. A rule that marks deletion *and* lists other feature
//! changes is rejected (see [`RuleError::DeletionWithFeatures`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use soundlaw::serialization::{read_inventory, read_rules};
//! use std::fs::File;
//!
//! let inventory = read_inventory(File::open("inventory.json")?)?;
//! let rules = read_rules(File::open("rules.json")?)?;
//! ```

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::inventory::{Diacritic, Inventory};
use crate::rule::{ConditionSet, Rule, RuleError, Transform};
use crate::segment::Segment;

/// The sentinel feature label that marks deletion in rule files.
pub const DELETION_FEATURE: &str = "deletion";

/// Errors that can occur while reading or writing rule and inventory files.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON syntax or structure error
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
    /// I/O error
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// A rule record is malformed
    #[error(transparent)]
    Rule(#[from] RuleError),
    /// A feature value in a segment table is not `"+"`, `"-"`, or `"0"`
    #[error("feature {feature:?} on segment {symbol:?} has invalid value {value:?} (expected \"+\", \"-\", or \"0\")")]
    InvalidFeatureValue {
        /// The base symbol carrying the bad value.
        symbol: String,
        /// The feature label.
        feature: String,
        /// The offending value.
        value: String,
    },
    /// A diacritic symbol is not a single character
    #[error("diacritic symbol {0:?} must be a single character")]
    InvalidDiacritic(String),
}

// ============================================================================
// Wire shapes
// ============================================================================

/// A `positive`/`negative`/`zero` label bundle as it appears on the wire.
///
/// All three keys are optional; a missing key is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBundleSpec {
    /// Labels asserted or set positive.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positive: Vec<String>,
    /// Labels asserted or set negative.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negative: Vec<String>,
    /// Labels asserted or set zero.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zero: Vec<String>,
}

impl FeatureBundleSpec {
    fn to_condition_set(&self) -> ConditionSet {
        ConditionSet::from_labels(
            self.positive.iter().cloned(),
            self.negative.iter().cloned(),
            self.zero.iter().cloned(),
        )
    }

    fn to_segment(&self) -> Segment {
        Segment::from_labels(
            self.positive.iter().cloned(),
            self.negative.iter().cloned(),
            self.zero.iter().cloned(),
        )
    }

    fn from_segment(segment: &Segment) -> Self {
        FeatureBundleSpec {
            positive: segment.positive().iter().cloned().collect(),
            negative: segment.negative().iter().cloned().collect(),
            zero: segment.zero().iter().cloned().collect(),
        }
    }

    fn from_condition_set(conditions: &ConditionSet) -> Self {
        FeatureBundleSpec {
            positive: conditions.positive().iter().cloned().collect(),
            negative: conditions.negative().iter().cloned().collect(),
            zero: conditions.zero().iter().cloned().collect(),
        }
    }
}

/// A rule record as it appears on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Short identifier used in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description of the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Conditions the matched segment must meet. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<FeatureBundleSpec>,
    /// Restrict matching to the first segment.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub first: bool,
    /// Restrict matching to the last segment.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub last: bool,
    /// Conditions on the preceding segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<FeatureBundleSpec>,
    /// Conditions on the following segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<FeatureBundleSpec>,
    /// The transformation bundle. Required. `"deletion"` in `positive`
    /// marks segment removal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies: Option<FeatureBundleSpec>,
}

impl TryFrom<RuleSpec> for Rule {
    type Error = RuleError;

    fn try_from(spec: RuleSpec) -> Result<Rule, RuleError> {
        let name = spec.name.unwrap_or_else(|| "<unnamed>".to_string());

        let conditions = spec
            .conditions
            .ok_or_else(|| RuleError::MissingConditions(name.clone()))?;
        let applies = spec
            .applies
            .ok_or_else(|| RuleError::MissingApplies(name.clone()))?;

        let transform = if applies.positive.iter().any(|f| f == DELETION_FEATURE) {
            let pure_deletion = applies.positive.iter().all(|f| f == DELETION_FEATURE)
                && applies.negative.is_empty()
                && applies.zero.is_empty();
            if !pure_deletion {
                return Err(RuleError::DeletionWithFeatures(name));
            }
            Transform::Delete
        } else {
            Transform::Merge(applies.to_segment())
        };

        Ok(Rule {
            name,
            description: spec.description.unwrap_or_default(),
            conditions: conditions.to_condition_set(),
            first: spec.first,
            last: spec.last,
            before: spec.before.as_ref().map(FeatureBundleSpec::to_condition_set),
            after: spec.after.as_ref().map(FeatureBundleSpec::to_condition_set),
            transform,
        })
    }
}

impl From<&Rule> for RuleSpec {
    fn from(rule: &Rule) -> RuleSpec {
        let applies = match &rule.transform {
            Transform::Merge(segment) => FeatureBundleSpec::from_segment(segment),
            Transform::Delete => FeatureBundleSpec {
                positive: vec![DELETION_FEATURE.to_string()],
                ..FeatureBundleSpec::default()
            },
        };

        RuleSpec {
            name: Some(rule.name.clone()),
            description: (!rule.description.is_empty()).then(|| rule.description.clone()),
            conditions: Some(FeatureBundleSpec::from_condition_set(&rule.conditions)),
            first: rule.first,
            last: rule.last,
            before: rule.before.as_ref().map(FeatureBundleSpec::from_condition_set),
            after: rule.after.as_ref().map(FeatureBundleSpec::from_condition_set),
            applies: Some(applies),
        }
    }
}

/// A segment table row: a base symbol and its feature classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// The transcription symbol, e.g. `"b"` or `"k͡p"`.
    pub symbol: String,
    /// Feature labels mapped to `"+"`, `"-"`, or `"0"`.
    #[serde(default)]
    pub features: BTreeMap<String, String>,
}

/// A diacritic table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiacriticSpec {
    /// The combining character, as a one-character string.
    pub symbol: String,
    /// The feature bundle the diacritic merges onto its base segment.
    #[serde(default)]
    pub applies: FeatureBundleSpec,
}

/// An inventory file: a segment table and a diacritic table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySpec {
    /// Base symbols, in table order.
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    /// Diacritics, in table order.
    #[serde(default)]
    pub diacritics: Vec<DiacriticSpec>,
}

fn segment_from_spec(spec: SegmentSpec) -> Result<(String, Segment), SerializationError> {
    let mut positive = Vec::new();
    let mut negative = Vec::new();
    let mut zero = Vec::new();

    for (feature, value) in spec.features {
        match value.as_str() {
            "+" => positive.push(feature),
            "-" => negative.push(feature),
            "0" => zero.push(feature),
            _ => {
                return Err(SerializationError::InvalidFeatureValue {
                    symbol: spec.symbol,
                    feature,
                    value,
                })
            }
        }
    }

    Ok((spec.symbol, Segment::from_labels(positive, negative, zero)))
}

fn segment_to_spec(symbol: &str, segment: &Segment) -> SegmentSpec {
    let mut features = BTreeMap::new();
    for label in segment.positive() {
        features.insert(label.clone(), "+".to_string());
    }
    for label in segment.negative() {
        features.insert(label.clone(), "-".to_string());
    }
    for label in segment.zero() {
        features.insert(label.clone(), "0".to_string());
    }
    SegmentSpec {
        symbol: symbol.to_string(),
        features,
    }
}

fn diacritic_from_spec(spec: DiacriticSpec) -> Result<Diacritic, SerializationError> {
    let mut chars = spec.symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(Diacritic::new(symbol, spec.applies.to_segment())),
        _ => Err(SerializationError::InvalidDiacritic(spec.symbol)),
    }
}

// ============================================================================
// Reading and writing
// ============================================================================

/// Read a rule file: a JSON array of rule records.
///
/// # Errors
///
/// Returns an error on malformed JSON, on a rule missing its `conditions`
/// or `applies` keys, or on a rule mixing deletion with feature changes.
pub fn read_rules<R: Read>(reader: R) -> Result<Vec<Rule>, SerializationError> {
    let specs: Vec<RuleSpec> = serde_json::from_reader(reader)?;
    specs
        .into_iter()
        .map(|spec| Rule::try_from(spec).map_err(SerializationError::from))
        .collect()
}

/// Write rules as a JSON array of rule records.
pub fn write_rules<W: Write>(rules: &[Rule], writer: W) -> Result<(), SerializationError> {
    let specs: Vec<RuleSpec> = rules.iter().map(RuleSpec::from).collect();
    serde_json::to_writer_pretty(writer, &specs)?;
    Ok(())
}

/// Read an inventory file.
///
/// # Errors
///
/// Returns an error on malformed JSON, on a feature value other than
/// `"+"`/`"-"`/`"0"`, or on a multi-character diacritic symbol.
pub fn read_inventory<R: Read>(reader: R) -> Result<Inventory, SerializationError> {
    let spec: InventorySpec = serde_json::from_reader(reader)?;

    let segments = spec
        .segments
        .into_iter()
        .map(segment_from_spec)
        .collect::<Result<Vec<_>, _>>()?;
    let diacritics = spec
        .diacritics
        .into_iter()
        .map(diacritic_from_spec)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Inventory::new(segments, diacritics))
}

/// Write an inventory file.
pub fn write_inventory<W: Write>(
    inventory: &Inventory,
    writer: W,
) -> Result<(), SerializationError> {
    let spec = InventorySpec {
        segments: inventory
            .symbols()
            .map(|(symbol, segment)| segment_to_spec(symbol, segment))
            .collect(),
        diacritics: inventory
            .diacritics()
            .map(|d| DiacriticSpec {
                symbol: d.symbol.to_string(),
                applies: FeatureBundleSpec::from_segment(&d.applies),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
