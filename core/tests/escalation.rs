//! Escalation calculator tests — deadlines, due flag, priority, display.

use chrono::{DateTime, Duration, TimeZone, Utc};
use wardline_core::escalation::{compute_deadline, evaluate, is_escalation_due};
use wardline_core::{EscalationPolicy, Priority, TrackerError};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, min, 0).unwrap()
}

/// Submissions with hour-of-day in [9, 21) get the 12-hour deadline.
#[test]
fn business_hours_submission_gets_twelve_hour_deadline() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 30);
    assert_eq!(
        compute_deadline(submitted, &policy),
        submitted + Duration::hours(12)
    );
}

/// Submissions outside business hours get the 24-hour deadline.
#[test]
fn after_hours_submission_gets_twenty_four_hour_deadline() {
    let policy = EscalationPolicy::default();
    let submitted = at(22, 0);
    assert_eq!(
        compute_deadline(submitted, &policy),
        submitted + Duration::hours(24)
    );
}

/// Hour exactly 9 is business hours; hour exactly 21 is after-hours.
/// Minutes and seconds never affect classification.
#[test]
fn classification_boundaries_use_the_hour_component_only() {
    let policy = EscalationPolicy::default();

    let opening = at(9, 0);
    assert_eq!(
        compute_deadline(opening, &policy),
        opening + Duration::hours(12),
        "hour 9 must classify as business hours"
    );

    let closing = at(21, 0);
    assert_eq!(
        compute_deadline(closing, &policy),
        closing + Duration::hours(24),
        "hour 21 must classify as after-hours"
    );

    let late_evening = at(20, 59);
    assert_eq!(
        compute_deadline(late_evening, &policy),
        late_evening + Duration::hours(12),
        "20:59 is still within business hours"
    );
}

/// A complaint that has ever received a response is never flagged due,
/// regardless of elapsed time.
#[test]
fn responded_complaint_is_never_due() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);
    let responded = Some(submitted + Duration::hours(1));

    for days in [1, 7, 365] {
        let now = submitted + Duration::days(days);
        assert!(
            !is_escalation_due(submitted, responded, now, &policy),
            "responded complaint flagged due after {days} day(s)"
        );
    }
}

/// The due flag flips strictly after the deadline, not at it.
#[test]
fn due_flag_is_strict_at_the_deadline() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);
    let deadline = compute_deadline(submitted, &policy);

    assert!(!is_escalation_due(submitted, None, deadline, &policy));
    assert!(is_escalation_due(
        submitted,
        None,
        deadline + Duration::seconds(1),
        &policy
    ));
}

/// Remaining time is clamped at zero — never reported negative.
#[test]
fn remaining_never_goes_negative() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);
    let responded = Some(submitted + Duration::hours(1));

    // Responded, so never due, but well past the deadline.
    let status = evaluate(submitted, responded, submitted + Duration::days(3), &policy);
    assert_eq!(status.remaining, Duration::zero());
    assert_eq!(status.display, "Escalating soon");
}

/// Urgent cuts in once remaining drops to two hours or less.
#[test]
fn urgent_threshold_is_two_hours_remaining() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);

    let just_outside = evaluate(
        submitted,
        None,
        submitted + Duration::hours(9) + Duration::minutes(59),
        &policy,
    );
    assert_eq!(just_outside.priority, Priority::Normal);

    let at_threshold = evaluate(submitted, None, submitted + Duration::hours(10), &policy);
    assert_eq!(at_threshold.priority, Priority::Urgent);
}

/// For fixed inputs, priority climbs normal → urgent → critical as `now`
/// advances and never regresses.
#[test]
fn priority_is_monotone_as_time_advances() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);

    let mut previous = Priority::Normal;
    let mut seen = vec![];
    for minutes in (0..=15 * 60).step_by(15) {
        let now = submitted + Duration::minutes(minutes);
        let priority = evaluate(submitted, None, now, &policy).priority;
        assert!(
            priority >= previous,
            "priority regressed from {previous} to {priority} at +{minutes}m"
        );
        previous = priority;
        seen.push(priority);
    }
    assert!(seen.contains(&Priority::Normal));
    assert!(seen.contains(&Priority::Urgent));
    assert!(seen.contains(&Priority::Critical));
}

/// Scenario: 10:00 submission, no response, one minute past the 12-hour
/// deadline → due, critical, "Escalation due".
#[test]
fn overdue_business_hours_complaint_is_critical() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);
    let now = submitted + Duration::hours(12) + Duration::minutes(1);

    let status = evaluate(submitted, None, now, &policy);
    assert!(status.due);
    assert_eq!(status.priority, Priority::Critical);
    assert_eq!(status.display, "Escalation due");
}

/// Scenario: 22:00 submission (after-hours), 20 hours elapsed. Deadline is
/// +24h, so 4h 0m remain and the complaint is still normal priority.
#[test]
fn after_hours_complaint_with_four_hours_left_is_normal() {
    let policy = EscalationPolicy::default();
    let submitted = at(22, 0);
    let now = submitted + Duration::hours(20);

    let status = evaluate(submitted, None, now, &policy);
    assert!(!status.due);
    assert_eq!(status.remaining, Duration::hours(4));
    assert_eq!(status.priority, Priority::Normal);
    assert_eq!(status.display, "4h 0m remaining");
}

/// Hour/minute split uses floor division — 90 minutes left reads 1h 30m.
#[test]
fn display_splits_whole_hours_and_minutes() {
    let policy = EscalationPolicy::default();
    let submitted = at(10, 0);
    let now = submitted + Duration::hours(10) + Duration::minutes(30);

    let status = evaluate(submitted, None, now, &policy);
    assert_eq!(status.display, "1h 30m remaining");
}

/// Evaluating at the submission instant is always normal: the full
/// deadline window exceeds two hours on both policy branches.
#[test]
fn evaluation_at_submission_time_is_normal() {
    let policy = EscalationPolicy::default();
    for submitted in [at(10, 0), at(22, 0)] {
        let status = evaluate(submitted, None, submitted, &policy);
        assert!(!status.due);
        assert_eq!(status.priority, Priority::Normal);
    }
}

/// A policy whose business-hours window is inverted is a fatal config
/// error, caught at validation, never silently misclassified.
#[test]
fn inverted_business_hours_policy_is_rejected() {
    let policy = EscalationPolicy {
        business_hours_start: 21,
        business_hours_end: 9,
        ..EscalationPolicy::default()
    };
    assert!(matches!(
        policy.validate(),
        Err(TrackerError::InvalidPolicy { .. })
    ));

    let equal = EscalationPolicy {
        business_hours_start: 9,
        business_hours_end: 9,
        ..EscalationPolicy::default()
    };
    assert!(equal.validate().is_err());
}

/// Deadline windows large enough to overflow duration arithmetic are a
/// config error caught at validation, never a panic in deadline math.
#[test]
fn oversized_deadline_hours_are_rejected() {
    let policy = EscalationPolicy {
        business_hours_deadline_hours: i64::MAX / 2,
        ..EscalationPolicy::default()
    };
    assert!(matches!(
        policy.validate(),
        Err(TrackerError::InvalidPolicy { .. })
    ));

    let after_hours = EscalationPolicy {
        after_hours_deadline_hours: 10_000_000_000_000_000,
        ..EscalationPolicy::default()
    };
    assert!(after_hours.validate().is_err());
}
