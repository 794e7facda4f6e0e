//! Deterministic HTTP filter chain ordering.
//!
//! Chain order starts from a fixed default precedence over all known
//! categories and is then adjusted by user-supplied [`FilterPosition`]
//! constraints, applied one at a time in declaration order. Each constraint
//! removes the named category's block and reinserts it adjacent to its
//! anchor, so the final position of a category repositioned twice reflects
//! only the later constraint. This is deliberately not a topological sort:
//! sequential extract-and-reinsert cannot cycle and always yields the same
//! order for the same inputs, which keeps proxy configuration reproducible
//! across reconciliations.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::xds::filters::{FilterCategory, HttpFilter};

/// Default filter precedence: a total order over all known categories.
///
/// Health-check is fixed first and the router fixed last; both are anchors
/// that constraints can never move. Changing this table changes output for
/// every unconstrained chain.
pub const DEFAULT_FILTER_ORDER: [FilterCategory; 14] = [
    FilterCategory::HealthCheck,
    FilterCategory::Fault,
    FilterCategory::Cors,
    FilterCategory::ExtAuthz,
    FilterCategory::BasicAuth,
    FilterCategory::OAuth2,
    FilterCategory::JwtAuthn,
    FilterCategory::Buffer,
    FilterCategory::ExtProc,
    FilterCategory::Wasm,
    FilterCategory::Rbac,
    FilterCategory::LocalRateLimit,
    FilterCategory::RateLimit,
    FilterCategory::Router,
];

static FILTER_PRECEDENCE: Lazy<HashMap<FilterCategory, usize>> = Lazy::new(|| {
    DEFAULT_FILTER_ORDER.iter().copied().enumerate().map(|(idx, category)| (category, idx)).collect()
});

fn precedence(filter: &HttpFilter) -> usize {
    filter
        .category()
        .and_then(|category| FILTER_PRECEDENCE.get(&category).copied())
        // Unknown filters sort after every known category, before the router.
        .unwrap_or(usize::MAX)
}

fn is_anchor(category: FilterCategory) -> bool {
    matches!(category, FilterCategory::HealthCheck | FilterCategory::Router)
}

/// A relative-ordering constraint on one filter category.
///
/// Exactly one of `before`/`after` names the anchor category. Constraints
/// are applied in the order they are declared; a category may be named by
/// several constraints and ends up where the last applicable one put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPosition {
    pub filter: FilterCategory,
    #[serde(default)]
    pub before: Option<FilterCategory>,
    #[serde(default)]
    pub after: Option<FilterCategory>,
}

impl FilterPosition {
    /// Place `filter` immediately before `anchor`'s block
    pub fn before(filter: FilterCategory, anchor: FilterCategory) -> Self {
        Self { filter, before: Some(anchor), after: None }
    }

    /// Place `filter` immediately after `anchor`'s block
    pub fn after(filter: FilterCategory, anchor: FilterCategory) -> Self {
        Self { filter, before: None, after: Some(anchor) }
    }

    /// Check that exactly one anchor direction is set
    pub fn validate(&self) -> Result<()> {
        match (self.before, self.after) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(Error::validation(
                "FilterPosition must set exactly one of 'before' or 'after'",
            )),
        }
    }
}

/// Order a route's HTTP filter chain.
///
/// Pure and total: invalid or inapplicable constraints are skipped, never
/// surfaced as errors, because a given chain legitimately may not contain
/// every category known to the system. Output order is independent of the
/// input order of `filters`.
pub fn sort_http_filters(filters: Vec<HttpFilter>, order: &[FilterPosition]) -> Vec<HttpFilter> {
    let mut entry = Vec::new();
    let mut terminal = Vec::new();
    let mut working = Vec::with_capacity(filters.len());

    for filter in filters {
        match filter.category() {
            Some(FilterCategory::HealthCheck) => entry.push(filter),
            Some(FilterCategory::Router) => terminal.push(filter),
            _ => working.push(filter),
        }
    }

    // Seed by default precedence. The tiebreak on instance name keeps multi
    // blocks contiguous in attachment order and makes the seed independent
    // of input iteration order.
    entry.sort_by(|a, b| a.name.cmp(&b.name));
    terminal.sort_by(|a, b| a.name.cmp(&b.name));
    working.sort_by(|a, b| (precedence(a), a.name.as_str()).cmp(&(precedence(b), b.name.as_str())));

    for position in order {
        apply_position(&mut working, position);
    }

    entry.extend(working);
    entry.extend(terminal);
    entry
}

/// Apply one constraint: remove the subject category's block and reinsert it
/// adjacent to the anchor's block, on the requested side.
fn apply_position(working: &mut Vec<HttpFilter>, position: &FilterPosition) {
    let (anchor, place_before) = match (position.before, position.after) {
        (Some(anchor), None) => (anchor, true),
        (None, Some(anchor)) => (anchor, false),
        _ => {
            tracing::debug!(
                filter = ?position.filter,
                "Skipping filter position with zero or two anchors"
            );
            return;
        }
    };

    let subject = position.filter;
    if subject == anchor {
        return;
    }
    // Anchor categories are immovable and cannot anchor a move themselves:
    // health-check is always first, the router always last.
    if is_anchor(subject) || is_anchor(anchor) {
        tracing::debug!(
            filter = ?subject,
            anchor = ?anchor,
            "Skipping filter position referencing an anchor category"
        );
        return;
    }
    if !working.iter().any(|f| f.category() == Some(subject))
        || !working.iter().any(|f| f.category() == Some(anchor))
    {
        tracing::debug!(
            filter = ?subject,
            anchor = ?anchor,
            "Filter position is a no-op for this chain"
        );
        return;
    }

    let mut block = Vec::new();
    let mut rest = Vec::with_capacity(working.len());
    for filter in working.drain(..) {
        if filter.category() == Some(subject) {
            block.push(filter);
        } else {
            rest.push(filter);
        }
    }
    *working = rest;

    let insert_at = if place_before {
        working.iter().position(|f| f.category() == Some(anchor)).unwrap_or(working.len())
    } else {
        working
            .iter()
            .rposition(|f| f.category() == Some(anchor))
            .map(|idx| idx + 1)
            .unwrap_or(working.len())
    };
    working.splice(insert_at..insert_at, block);
}
