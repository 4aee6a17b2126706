use super::*;

fn limiter(per_email: usize, global: usize) -> RateLimiter {
    RateLimiter::with_config(RateLimitConfig {
        per_email_limit: per_email,
        per_email_window: Duration::from_secs(600),
        global_limit: global,
        global_window: Duration::from_secs(60),
    })
}

#[test]
fn per_email_allows_up_to_limit() {
    let rl = limiter(3, 100);
    let now = Instant::now();

    for i in 0..3 {
        assert!(rl.check_and_record_at("a@example.com", now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at("a@example.com", now),
        Err(RateLimitError::PerEmailExceeded { limit: 3, window_secs: 600 })
    ));
}

#[test]
fn per_email_is_independent_between_addresses() {
    let rl = limiter(1, 100);
    let now = Instant::now();

    assert!(rl.check_and_record_at("a@example.com", now).is_ok());
    assert!(rl.check_and_record_at("b@example.com", now).is_ok());
    assert!(rl.check_and_record_at("a@example.com", now).is_err());
}

#[test]
fn global_allows_up_to_limit() {
    let rl = limiter(10, 2);
    let now = Instant::now();

    assert!(rl.check_and_record_at("a@example.com", now).is_ok());
    assert!(rl.check_and_record_at("b@example.com", now).is_ok());
    assert!(matches!(
        rl.check_and_record_at("c@example.com", now),
        Err(RateLimitError::GlobalExceeded { limit: 2, .. })
    ));
}

#[test]
fn window_expiry_allows_new_requests() {
    let rl = limiter(1, 100);
    let start = Instant::now();

    assert!(rl.check_and_record_at("a@example.com", start).is_ok());
    assert!(rl.check_and_record_at("a@example.com", start).is_err());

    let later = start + Duration::from_secs(601);
    assert!(rl.check_and_record_at("a@example.com", later).is_ok());
}

#[test]
fn rejected_requests_are_not_recorded() {
    let rl = limiter(1, 2);
    let now = Instant::now();

    assert!(rl.check_and_record_at("a@example.com", now).is_ok());
    // Rejected by the per-email limit; must not consume global budget.
    assert!(rl.check_and_record_at("a@example.com", now).is_err());
    assert!(rl.check_and_record_at("b@example.com", now).is_ok());
}
