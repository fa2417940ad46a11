//! Integration tests for the catalog, ledger, and resolver.
//!
//! These run against a real Postgres and are skipped when
//! `TEST_DATABASE_URL` is not set. Migrations are applied on connect, so a
//! bare database works.

use std::sync::atomic::{AtomicU32, Ordering};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use kurs_core::exchange::RateLookupMethod;
use kurs_db::migration::Migrator;
use kurs_db::repositories::{CurrencyError, CurrencyRepository, ExchangeRateRepository, RateError};
use kurs_db::resolver::RateResolver;

static SCHEMA: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();

async fn connect_migrated() -> Option<DatabaseConnection> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let db = kurs_db::connect(&url).await.expect("Failed to connect");
    // Recreate the schema once per test run so codes from earlier runs
    // cannot collide.
    SCHEMA
        .get_or_init(|| {
            let db = db.clone();
            async move {
                Migrator::fresh(&db).await.expect("Failed to migrate");
            }
        })
        .await;
    Some(db)
}

/// Generates a fresh 3-letter code; currency codes are global, so each test
/// works with its own currencies.
fn unique_code() -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let mut n = COUNTER.fetch_add(1, Ordering::Relaxed) % 17_576; // 26^3
    let mut code = String::new();
    for _ in 0..3 {
        code.push(char::from(b'A' + u8::try_from(n % 26).expect("digit fits in u8")));
        n /= 26;
    }
    code
}

async fn add_currency(repo: &CurrencyRepository, code: &str) -> kurs_db::entities::currencies::Model {
    repo.add("Test Currency", code, "$")
        .await
        .expect("Failed to add currency")
}

#[tokio::test]
async fn test_currency_add_and_get() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let repo = CurrencyRepository::new(db);

    let code = unique_code();
    let created = add_currency(&repo, &code).await;
    assert_eq!(created.code, code);

    let fetched = repo.get_by_code(&code).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Test Currency");
}

#[tokio::test]
async fn test_currency_duplicate_code_conflicts() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let repo = CurrencyRepository::new(db);

    let code = unique_code();
    add_currency(&repo, &code).await;

    let second = repo.add("Other Name", &code, "#").await;
    assert!(matches!(second, Err(CurrencyError::AlreadyExists(c)) if c == code));
}

#[tokio::test]
async fn test_currency_unknown_code_not_found() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let repo = CurrencyRepository::new(db);

    let result = repo.get_by_code("ZZZZ").await;
    assert!(matches!(result, Err(CurrencyError::NotFound(_))));
}

#[tokio::test]
async fn test_rate_add_get_and_inverse_pair_is_distinct() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let currencies = CurrencyRepository::new(db.clone());
    let rates = ExchangeRateRepository::new(db);

    let (a_code, b_code) = (unique_code(), unique_code());
    let a = add_currency(&currencies, &a_code).await;
    let b = add_currency(&currencies, &b_code).await;

    rates.add(&a, &b, dec!(77.75)).await.unwrap();

    // Same ordered pair conflicts
    let dup = rates.add(&a, &b, dec!(78)).await;
    assert!(matches!(dup, Err(RateError::AlreadyExists(..))));

    // Inverse ordering is a distinct key
    rates.add(&b, &a, dec!(0.013)).await.unwrap();

    let record = rates.get_by_pair(&a_code, &b_code).await.unwrap();
    assert_eq!(record.rate, dec!(77.75));
    assert_eq!(record.base.code, a_code);
    assert_eq!(record.target.code, b_code);
}

#[tokio::test]
async fn test_rate_unknown_pair_not_found() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let rates = ExchangeRateRepository::new(db);

    // Neither the pair nor the currencies exist
    let result = rates.get_by_pair("AAB", "CCD").await;
    assert!(matches!(result, Err(RateError::NotFound(..))));
}

#[tokio::test]
async fn test_rate_update_in_place() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let currencies = CurrencyRepository::new(db.clone());
    let rates = ExchangeRateRepository::new(db);

    let (a_code, b_code) = (unique_code(), unique_code());
    let a = add_currency(&currencies, &a_code).await;
    let b = add_currency(&currencies, &b_code).await;

    rates.add(&a, &b, dec!(1.10)).await.unwrap();
    let updated = rates.update(&a_code, &b_code, dec!(1.25)).await.unwrap();
    assert_eq!(updated.rate, dec!(1.25));

    let fetched = rates.get_by_pair(&a_code, &b_code).await.unwrap();
    assert_eq!(fetched.id, updated.id);
    assert_eq!(fetched.rate, dec!(1.25));

    // Updating a missing directed pair fails without touching the inverse
    let missing = rates.update(&b_code, &a_code, dec!(2)).await;
    assert!(matches!(missing, Err(RateError::NotFound(..))));
}

#[tokio::test]
async fn test_resolver_strategies() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let currencies = CurrencyRepository::new(db.clone());
    let rates = ExchangeRateRepository::new(db);

    // A dedicated reference currency keeps this test isolated
    let (ref_code, rub_code, eur_code) = (unique_code(), unique_code(), unique_code());
    let reference = add_currency(&currencies, &ref_code).await;
    let rub = add_currency(&currencies, &rub_code).await;
    let eur = add_currency(&currencies, &eur_code).await;

    rates.add(&reference, &rub, dec!(77.75)).await.unwrap();
    rates.add(&reference, &eur, dec!(0.85)).await.unwrap();

    let resolver = RateResolver::new(rates, currencies, ref_code.clone());

    // Identity
    let identity = resolver.resolve(&rub_code, &rub_code).await.unwrap();
    assert_eq!(identity.rate, Decimal::ONE);
    assert_eq!(identity.method, RateLookupMethod::Identity);
    assert_eq!(identity.base.id, identity.target.id);

    // Direct
    let direct = resolver.resolve(&ref_code, &rub_code).await.unwrap();
    assert_eq!(direct.rate, dec!(77.75));
    assert_eq!(direct.method, RateLookupMethod::Direct);

    // Inverse, re-oriented to the requested direction
    let inverse = resolver.resolve(&rub_code, &ref_code).await.unwrap();
    assert_eq!(inverse.rate, Decimal::ONE / dec!(77.75));
    assert_eq!(inverse.method, RateLookupMethod::Inverse);
    assert_eq!(inverse.base.code, rub_code);
    assert_eq!(inverse.target.code, ref_code);

    // Cross through the reference
    let cross = resolver.resolve(&eur_code, &rub_code).await.unwrap();
    assert_eq!(cross.rate, dec!(77.75) / dec!(0.85));
    assert_eq!(cross.method, RateLookupMethod::Cross);
    assert_eq!(cross.base.code, eur_code);
    assert_eq!(cross.target.code, rub_code);
}

#[tokio::test]
async fn test_resolver_misses() {
    let Some(db) = connect_migrated().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let currencies = CurrencyRepository::new(db.clone());
    let rates = ExchangeRateRepository::new(db);

    let (ref_code, a_code, b_code) = (unique_code(), unique_code(), unique_code());
    let reference = add_currency(&currencies, &ref_code).await;
    let a = add_currency(&currencies, &a_code).await;
    add_currency(&currencies, &b_code).await;

    // Only one reference leg exists; the cross strategy must surface the
    // missing (reference, b) pair.
    rates.add(&reference, &a, dec!(2)).await.unwrap();

    let resolver = RateResolver::new(rates, currencies, ref_code.clone());

    let miss = resolver.resolve(&a_code, &b_code).await;
    match miss {
        Err(RateError::NotFound(base, target)) => {
            assert_eq!(base, ref_code);
            assert_eq!(target, b_code);
        }
        other => panic!("expected RateNotFound, got {other:?}"),
    }

    // Identity on an unknown code is a catalog miss
    let unknown = resolver.resolve("AAB", "AAB").await;
    assert!(matches!(
        unknown,
        Err(RateError::Currency(CurrencyError::NotFound(_)))
    ));
}
