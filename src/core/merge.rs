//! Merging a parsed free-text query into filter state
//!
//! A parser may return anything, including makes the catalog does not carry.
//! Only values present in the current [`CatalogDomain`] reach the criteria;
//! the rest are recorded in the [`MergeReport`] and otherwise ignored.

use crate::core::domain::CatalogDomain;
use crate::core::filter::{FilterCriteria, PriceRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Partial criteria produced by a free-text parser
///
/// Keys the parser could not extract are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl ParsedFilter {
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.features.is_empty()
    }
}

/// A parsed value that was not applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedValue {
    pub field: &'static str,
    pub value: String,
}

/// What a merge changed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    pub applied: Vec<&'static str>,
    pub dropped: Vec<DroppedValue>,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }

    fn drop_value(&mut self, field: &'static str, value: impl ToString) {
        let value = value.to_string();
        tracing::debug!(field, value = %value, "dropping parsed value outside catalog domain");
        self.dropped.push(DroppedValue { field, value });
    }
}

fn to_price(field: &'static str, raw: f64, report: &mut MergeReport) -> Option<u64> {
    if raw.is_finite() && raw >= 0.0 && raw <= u64::MAX as f64 {
        Some(raw.round() as u64)
    } else {
        report.drop_value(field, raw);
        None
    }
}

/// Apply the in-domain parts of `parsed` to `criteria`
///
/// Each dimension the parser filled in replaces the current selection for
/// that dimension; dimensions it left out are untouched. A model is only
/// accepted under its make: the parsed make if it survived, else the make
/// already selected, else the single make in the catalog offering it.
pub fn merge_parsed(
    criteria: &mut FilterCriteria,
    parsed: ParsedFilter,
    domain: &CatalogDomain,
) -> MergeReport {
    let mut report = MergeReport::default();

    if let Some(make) = parsed.make.as_deref() {
        match domain.canonical_make(make) {
            Some(canonical) => {
                criteria.select_make(Some(canonical.to_string()));
                report.applied.push("make");
            }
            None => report.drop_value("make", make),
        }
    }

    if let Some(model) = parsed.model.as_deref() {
        let resolved = match criteria.make.as_deref() {
            Some(make) => domain
                .canonical_model(make, model)
                .map(|m| (make.to_string(), m.to_string())),
            None => domain.make_for_model(model).and_then(|make| {
                domain
                    .canonical_model(make, model)
                    .map(|m| (make.to_string(), m.to_string()))
            }),
        };

        match resolved {
            Some((make, model)) => {
                if criteria.make.as_deref() != Some(make.as_str()) {
                    criteria.select_make(Some(make));
                    report.applied.push("make");
                }
                criteria.model = Some(model);
                report.applied.push("model");
            }
            None => report.drop_value("model", model),
        }
    }

    let min = parsed
        .min_price
        .and_then(|raw| to_price("minPrice", raw, &mut report));
    let max = parsed
        .max_price
        .and_then(|raw| to_price("maxPrice", raw, &mut report));

    match (min, max) {
        (Some(min), Some(max)) => {
            criteria.price = PriceRange::new(min, max);
            report.applied.extend(["minPrice", "maxPrice"]);
        }
        (Some(min), None) => {
            criteria.price.set_min(min);
            report.applied.push("minPrice");
        }
        (None, Some(max)) => {
            criteria.price.set_max(max);
            report.applied.push("maxPrice");
        }
        (None, None) => {}
    }

    let mut features = BTreeSet::new();
    for feature in &parsed.features {
        match domain.canonical_feature(feature) {
            Some(canonical) => {
                features.insert(canonical.to_string());
            }
            None => report.drop_value("features", feature),
        }
    }
    if !features.is_empty() {
        criteria.features = features;
        report.applied.push("features");
    }

    report
}
