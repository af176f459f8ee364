//! End-to-end verification flow over the in-memory infrastructure

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use sv_core::errors::{DomainError, VerificationError};
use sv_core::services::clock::ManualClock;
use sv_core::services::verification::{VerificationService, VerificationServiceConfig};
use sv_infra::sms::create_mock_sms;
use sv_infra::{InMemoryCodeStore, InMemoryRateLimiter};
use sv_shared::{RateLimitConfig, VerificationConfig};

const PHONE: &str = "+15551234567";

struct Flow {
    service: VerificationService<InMemoryCodeStore, InMemoryRateLimiter>,
    store: Arc<InMemoryCodeStore>,
    clock: Arc<ManualClock>,
}

fn flow() -> Flow {
    let store = Arc::new(InMemoryCodeStore::new());
    let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default()));
    let mock = create_mock_sms(
        &VerificationConfig {
            mock_delay_ms: 0,
            ..VerificationConfig::default()
        },
        true,
    );
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
    ));
    let config = VerificationServiceConfig {
        expose_mock_code: true,
        ..VerificationServiceConfig::default()
    };

    let service = VerificationService::new(store.clone(), limiter, mock, config)
        .with_clock(clock.clone());

    Flow { service, store, clock }
}

fn verification_error(err: DomainError) -> VerificationError {
    match err {
        DomainError::Verification(err) => err,
        other => panic!("Expected verification error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_and_check_once() {
    let f = flow();
    let code = f.service.send_verification_code(PHONE, "unknown").await.unwrap().mock_code.unwrap();

    assert!(f.service.verify_code(PHONE, &code).await.is_ok());

    let err = f.service.verify_code(PHONE, &code).await.unwrap_err();
    assert_eq!(verification_error(err), VerificationError::NoPendingVerification);
}

#[tokio::test]
async fn test_fourth_issue_in_window_is_limited() {
    let f = flow();

    for _ in 0..3 {
        f.service.send_verification_code(PHONE, "198.51.100.4").await.unwrap();
    }
    let err = f.service.send_verification_code(PHONE, "198.51.100.4").await.unwrap_err();
    assert_eq!(verification_error(err), VerificationError::RateLimitExceeded);

    f.clock.advance(Duration::seconds(301));
    assert!(f.service.send_verification_code(PHONE, "198.51.100.4").await.is_ok());
}

#[tokio::test]
async fn test_expired_then_swept() {
    let f = flow();
    let code = f.service.send_verification_code(PHONE, "unknown").await.unwrap().mock_code.unwrap();

    f.clock.advance(Duration::minutes(6));
    let err = f.service.verify_code(PHONE, &code).await.unwrap_err();
    assert_eq!(verification_error(err), VerificationError::CodeExpired);

    f.service.send_verification_code("+15557654321", "unknown").await.unwrap();
    f.clock.advance(Duration::minutes(6));
    f.service.send_verification_code(PHONE, "other").await.unwrap();

    assert!(f.store.get("+15557654321").await.is_none());
    assert_eq!(f.store.len().await, 1);
}

#[tokio::test]
async fn test_exhaustion_deletes_entry() {
    let f = flow();
    let code = f.service.send_verification_code(PHONE, "unknown").await.unwrap().mock_code.unwrap();
    let wrong = if code == "999999" { "888888" } else { "999999" };

    let mut last = None;
    for _ in 0..5 {
        last = Some(verification_error(f.service.verify_code(PHONE, wrong).await.unwrap_err()));
    }
    assert_eq!(last, Some(VerificationError::InvalidCode { attempts_remaining: 0 }));
    assert!(f.store.is_empty().await);

    let err = f.service.verify_code(PHONE, &code).await.unwrap_err();
    assert_eq!(verification_error(err), VerificationError::NoPendingVerification);
}
