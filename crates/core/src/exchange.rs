//! Rate resolution strategies.
//!
//! The effective rate between two currencies is derived from the stored
//! directed edges by an ordered list of strategies, each of which either
//! produces a rate or passes to the next:
//!
//! 1. Identity: same code on both sides, rate 1
//! 2. Direct: the stored (from, to) edge
//! 3. Inverse: the stored (to, from) edge, inverted
//! 4. Cross: rate(ref→to) / rate(ref→from) through the reference currency
//!
//! The cross strategy only consults edges directed FROM the reference
//! currency; there is no multi-hop search beyond that single pivot. Keeping
//! every currency quoted against the reference is what makes any-to-any
//! conversion possible.
//!
//! [`resolve_edges`] is the pure form of this chain over an in-memory edge
//! slice. The database-backed resolver in `kurs-db` follows the same order;
//! unlike the database resolver, the pure form cannot check that an identity
//! lookup names a known currency.

use rust_decimal::Decimal;

/// How an effective rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLookupMethod {
    /// Same currency on both sides.
    Identity,
    /// Stored (from, to) edge used as-is.
    Direct,
    /// Stored (to, from) edge, inverted.
    Inverse,
    /// Composed from two edges directed from the reference currency.
    Cross,
}

/// A directed exchange-rate edge.
#[derive(Debug, Clone)]
pub struct RateEdge {
    /// Base currency code.
    pub base: String,
    /// Target currency code.
    pub target: String,
    /// Stored rate (base → target).
    pub rate: Decimal,
}

impl RateEdge {
    /// Convenience constructor.
    pub fn new(base: impl Into<String>, target: impl Into<String>, rate: Decimal) -> Self {
        Self {
            base: base.into(),
            target: target.into(),
            rate,
        }
    }
}

/// Resolves the effective rate between `from` and `to` over a slice of edges.
///
/// Returns `None` when every strategy misses. Stored rates are positive by
/// the ledger invariant, so the inverse and cross divisions are defined.
#[must_use]
pub fn resolve_edges(
    edges: &[RateEdge],
    from: &str,
    to: &str,
    reference: &str,
) -> Option<(Decimal, RateLookupMethod)> {
    if from == to {
        return Some((Decimal::ONE, RateLookupMethod::Identity));
    }

    if let Some(direct) = find_edge(edges, from, to) {
        return Some((direct, RateLookupMethod::Direct));
    }

    if let Some(inverse) = find_edge(edges, to, from) {
        return Some((Decimal::ONE / inverse, RateLookupMethod::Inverse));
    }

    let ref_to_from = find_edge(edges, reference, from)?;
    let ref_to_target = find_edge(edges, reference, to)?;
    Some((ref_to_target / ref_to_from, RateLookupMethod::Cross))
}

fn find_edge(edges: &[RateEdge], base: &str, target: &str) -> Option<Decimal> {
    edges
        .iter()
        .find(|e| e.base == base && e.target == target)
        .map(|e| e.rate)
}
