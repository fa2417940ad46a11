//! Database-backed rate resolver.
//!
//! Evaluates the same strategy order as [`kurs_core::exchange::resolve_edges`]
//! against the ledger: identity, direct, inverse, cross via the reference
//! currency. Strategies are Option-returning lookups chained in order; the
//! first hit wins.

use rust_decimal::Decimal;

use kurs_core::exchange::RateLookupMethod;

use crate::entities::currencies;
use crate::repositories::{CurrencyRepository, ExchangeRateRepository, RateError};

/// An effective rate with the currency rows it runs between.
///
/// `base` and `target` always match the requested direction, whatever
/// strategy produced the rate.
#[derive(Debug, Clone)]
pub struct ResolvedRate {
    /// The from-currency.
    pub base: currencies::Model,
    /// The to-currency.
    pub target: currencies::Model,
    /// The effective rate (base → target), canonical precision.
    pub rate: Decimal,
    /// Which strategy produced the rate.
    pub method: RateLookupMethod,
}

/// Resolves effective rates between currency codes.
///
/// Holds its collaborators by constructor injection; the reference currency
/// code is injectable (config default "USD") rather than hard-coded.
#[derive(Debug, Clone)]
pub struct RateResolver {
    rates: ExchangeRateRepository,
    currencies: CurrencyRepository,
    reference_code: String,
}

impl RateResolver {
    /// Creates a resolver over the given ledger and catalog.
    pub fn new(
        rates: ExchangeRateRepository,
        currencies: CurrencyRepository,
        reference_code: impl Into<String>,
    ) -> Self {
        Self {
            rates,
            currencies,
            reference_code: reference_code.into(),
        }
    }

    /// The reference currency code used by the cross strategy.
    #[must_use]
    pub fn reference_code(&self) -> &str {
        &self.reference_code
    }

    /// Resolves the effective rate from `from_code` to `to_code`.
    ///
    /// Strategy order, short-circuiting on the first hit:
    /// 1. Identity: equal codes; the code must exist in the catalog.
    /// 2. Direct: the stored (from, to) edge.
    /// 3. Inverse: the stored (to, from) edge, inverted and re-oriented.
    /// 4. Cross: (ref → to) / (ref → from). Only edges directed FROM the
    ///    reference participate; if either is missing, the lookup fails
    ///    with that missing pair. No further fallback (single-hop limit).
    pub async fn resolve(&self, from_code: &str, to_code: &str) -> Result<ResolvedRate, RateError> {
        if from_code == to_code {
            let currency = self.currencies.get_by_code(from_code).await?;
            return Ok(ResolvedRate {
                base: currency.clone(),
                target: currency,
                rate: Decimal::ONE,
                method: RateLookupMethod::Identity,
            });
        }

        if let Some(direct) = self.rates.find_pair(from_code, to_code).await? {
            return Ok(ResolvedRate {
                base: direct.base,
                target: direct.target,
                rate: direct.rate,
                method: RateLookupMethod::Direct,
            });
        }

        if let Some(inverse) = self.rates.find_pair(to_code, from_code).await? {
            // Swap sides so base/target match the requested direction.
            return Ok(ResolvedRate {
                base: inverse.target,
                target: inverse.base,
                rate: Decimal::ONE / inverse.rate,
                method: RateLookupMethod::Inverse,
            });
        }

        let reference = self.reference_code.as_str();
        let ref_from = self
            .rates
            .find_pair(reference, from_code)
            .await?
            .ok_or_else(|| RateError::NotFound(reference.to_string(), from_code.to_string()))?;
        let ref_to = self
            .rates
            .find_pair(reference, to_code)
            .await?
            .ok_or_else(|| RateError::NotFound(reference.to_string(), to_code.to_string()))?;

        Ok(ResolvedRate {
            base: ref_from.target,
            target: ref_to.target,
            rate: ref_to.rate / ref_from.rate,
            method: RateLookupMethod::Cross,
        })
    }
}
