//! Integration tests for medibook-core services
//!
//! These tests run the full context over a real DuckDB file in a temp
//! directory. Code generation uses a seeded RNG where the value matters.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use medibook_core::adapters::memory::MemoryStore;
use medibook_core::config::Config;
use medibook_core::ports::KeyValueStore;
use medibook_core::{
    BookingRequest, EntryPoint, Error, LoggingService, MedibookContext, SignupForm, SignupStage,
    User, Verification,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a context over a fresh data directory
fn create_test_context(temp_dir: &TempDir) -> MedibookContext {
    MedibookContext::new(temp_dir.path(), None).expect("Failed to create context")
}

fn ann_form() -> SignupForm {
    SignupForm {
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@x.com".to_string(),
        phone: "5551234567".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        dob: "1990-01-01".to_string(),
    }
}

/// Read a stored key straight from the store and parse it
fn stored_json(ctx: &MedibookContext, key: &str) -> Option<serde_json::Value> {
    ctx.repository
        .store()
        .get_item(key)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

/// Sign up Ann and return the verified user
fn register_ann(ctx: &MedibookContext) -> User {
    let mut session = ctx.restore_session().unwrap();
    let code = ctx.signup_service.submit(&mut session, &ann_form()).unwrap();
    match ctx.signup_service.verify(&mut session, code.as_str()).unwrap() {
        Verification::Accepted(user) => user,
        other => panic!("expected acceptance, got {:?}", other),
    }
}

// ============================================================================
// Signup Flow Tests
// ============================================================================

/// The worked example: code issued, nothing stored, then the code is
/// submitted back and the record lands under both user keys
#[test]
fn test_signup_scenario_persists_after_code_match() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);
    let mut session = ctx.restore_session().unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let code = ctx
        .signup_service
        .submit_with_rng(&mut session, &ann_form(), &mut rng)
        .unwrap();
    let value: u32 = code.as_str().parse().unwrap();
    assert!((100_000..=999_999).contains(&value));
    assert_eq!(stored_json(&ctx, "medibook_user"), None);
    assert_eq!(stored_json(&ctx, "medibook_users"), None);

    let outcome = ctx
        .signup_service
        .verify(&mut session, &format!("{}\n", code.as_str()))
        .unwrap();
    let Verification::Accepted(user) = outcome else {
        panic!("code should have matched");
    };

    let expected = serde_json::to_value(&user).unwrap();
    assert_eq!(stored_json(&ctx, "medibook_user"), Some(expected.clone()));
    assert_eq!(
        stored_json(&ctx, "medibook_users"),
        Some(serde_json::json!([expected]))
    );
    assert_eq!(user.first_name, "Ann");
    assert_eq!(session.greeting().as_deref(), Some("Hello, Ann"));
}

/// A wrong code can be retried any number of times without side effects
#[test]
fn test_signup_rejections_leave_store_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);
    let mut session = ctx.restore_session().unwrap();
    let mut rng = StdRng::seed_from_u64(77);

    let code = ctx
        .signup_service
        .submit_with_rng(&mut session, &ann_form(), &mut rng)
        .unwrap();

    let mut attempts = 0;
    for candidate in (100_000u32..100_020).map(|n| n.to_string()) {
        if candidate == code.as_str() {
            continue;
        }
        attempts += 1;
        assert_eq!(
            ctx.signup_service.verify(&mut session, &candidate).unwrap(),
            Verification::Rejected { attempts }
        );
    }

    assert!(ctx.repository.store().keys().unwrap().is_empty());
    assert_eq!(session.signup.stage(), SignupStage::CodeIssued);

    // The original code still works afterwards
    assert!(matches!(
        ctx.signup_service.verify(&mut session, code.as_str()).unwrap(),
        Verification::Accepted(_)
    ));
}

/// Resent codes invalidate the previous one
#[test]
fn test_resend_then_verify_with_new_code() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);
    let mut session = ctx.restore_session().unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let first = ctx
        .signup_service
        .submit_with_rng(&mut session, &ann_form(), &mut rng)
        .unwrap();
    let mut second = ctx
        .signup_service
        .resend_with_rng(&mut session, &mut rng)
        .unwrap();
    while second == first {
        second = ctx
            .signup_service
            .resend_with_rng(&mut session, &mut rng)
            .unwrap();
    }
    assert_eq!(stored_json(&ctx, "medibook_user"), None);

    assert!(matches!(
        ctx.signup_service.verify(&mut session, first.as_str()).unwrap(),
        Verification::Rejected { .. }
    ));
    assert!(matches!(
        ctx.signup_service.verify(&mut session, second.as_str()).unwrap(),
        Verification::Accepted(_)
    ));
}

/// A pending signup does not survive its session
#[test]
fn test_pending_signup_is_session_scoped() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    let code = {
        let mut session = ctx.restore_session().unwrap();
        ctx.signup_service.submit(&mut session, &ann_form()).unwrap()
    };

    let mut fresh = ctx.restore_session().unwrap();
    let err = ctx
        .signup_service
        .verify(&mut fresh, code.as_str())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
}

// ============================================================================
// Login Tests
// ============================================================================

#[test]
fn test_login_after_signup_and_logout() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);
    register_ann(&ctx);

    let mut session = ctx.restore_session().unwrap();
    assert!(session.is_logged_in());

    ctx.auth_service.logout(&mut session).unwrap();
    assert_eq!(stored_json(&ctx, "medibook_user"), None);
    assert!(!ctx.restore_session().unwrap().is_logged_in());

    let err = ctx
        .auth_service
        .login(&mut session, "ann@x.com", "wrong-password")
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid login credentials");

    ctx.auth_service
        .login(&mut session, "ann@x.com", "secret1")
        .unwrap();
    assert!(ctx.restore_session().unwrap().is_logged_in());
}

/// Session state survives reopening the data directory
#[test]
fn test_session_restored_across_contexts() {
    let temp_dir = TempDir::new().unwrap();
    {
        let ctx = create_test_context(&temp_dir);
        register_ann(&ctx);
    }

    let ctx = create_test_context(&temp_dir);
    let session = ctx.restore_session().unwrap();
    assert_eq!(
        session.current_user.map(|u| u.email),
        Some("ann@x.com".to_string())
    );
}

// ============================================================================
// Booking Tests
// ============================================================================

#[test]
fn test_booking_appends_exactly_one_record() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.booking_service
        .book(BookingRequest::new("Dr. Michael Chen", "2025-06-02", "14:00"))
        .unwrap();

    let stored = stored_json(&ctx, "medibook_appointments").unwrap();
    let list = stored.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["doctor"], "Dr. Michael Chen");
    assert_eq!(list[0]["status"], "upcoming");

    assert!(ctx
        .booking_service
        .book(BookingRequest::new("Dr. Michael Chen", "", "14:00"))
        .is_err());
    assert!(ctx
        .booking_service
        .book(BookingRequest::new("Dr. Michael Chen", "2025-06-02", ""))
        .is_err());
    assert_eq!(ctx.booking_service.list().unwrap().len(), 1);
}

// ============================================================================
// Storage Recovery Tests
// ============================================================================

/// A corrupted value is cleared and the recovery is logged
#[test]
fn test_corrupt_value_is_cleared_and_logged() {
    let temp_dir = TempDir::new().unwrap();
    let logger =
        Arc::new(LoggingService::new(temp_dir.path(), EntryPoint::Cli, "test").unwrap());
    let ctx = MedibookContext::new(temp_dir.path(), Some(Arc::clone(&logger))).unwrap();

    ctx.repository
        .store()
        .set_item("medibook_appointments", "[{\"id\":")
        .unwrap();

    assert!(ctx.booking_service.list().unwrap().is_empty());
    assert_eq!(stored_json(&ctx, "medibook_appointments"), None);

    let errors = logger.get_errors(10).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].event, "storage_entry_recovered");
    assert_eq!(errors[0].subject.as_deref(), Some("medibook_appointments"));
}

/// Passwords and codes never reach the event log
#[test]
fn test_event_log_has_no_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let logger =
        Arc::new(LoggingService::new(temp_dir.path(), EntryPoint::Cli, "test").unwrap());
    let ctx = MedibookContext::with_store(
        Config::default(),
        Arc::new(MemoryStore::new()),
        Some(Arc::clone(&logger)),
    );
    let mut session = ctx.restore_session().unwrap();

    let code = ctx.signup_service.submit(&mut session, &ann_form()).unwrap();
    ctx.signup_service.verify(&mut session, "000000").ok();
    ctx.signup_service.verify(&mut session, code.as_str()).unwrap();
    ctx.auth_service
        .login(&mut session, "ann@x.com", "bad-guess")
        .unwrap_err();

    let entries = logger.get_recent(100).unwrap();
    assert!(entries.len() >= 4);
    let dump: String = entries
        .iter()
        .flat_map(|e| [&e.subject, &e.error_message, &e.error_details, &e.command])
        .flatten()
        .map(|s| format!("{s}\n"))
        .collect();
    assert!(!dump.contains("secret1"));
    assert!(!dump.contains("bad-guess"));
    assert!(!dump.contains(code.as_str()));
}
