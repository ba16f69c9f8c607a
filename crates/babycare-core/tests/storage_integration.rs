//! Integration tests for the care log storage.
//!
//! These tests exercise the on-disk database the way the CLI uses it:
//! open, write, reopen, and feed a snapshot into the suggestion engine.

use babycare_core::care::{
    ActivityCategory, ActivityDetails, BabyProfile, CareActivity, DiaperCondition, DiaperKind,
    ReminderBoard, ReminderDraft, ReminderType,
};
use babycare_core::cry::{CryAnalysis, CryAssessment, CryNeed};
use babycare_core::storage::{CareDb, CareSnapshot, CareStore, LimitsConfig};
use babycare_core::suggest::SuggestionEngine;
use babycare_core::CoreError;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 8, 15, 0).unwrap()
}

fn baby(name: &str) -> BabyProfile {
    BabyProfile::new(name, NaiveDate::from_ymd_opt(2024, 9, 19).unwrap(), None, now()).unwrap()
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("babycare.db");
    let profile = baby("Theo");

    {
        let db = CareDb::open_at(&path).unwrap();
        db.add_baby(&profile).unwrap();
        let diaper = CareActivity::new(
            &profile.id,
            ActivityCategory::Diaper,
            now() - Duration::minutes(40),
            None,
            None,
            Some(ActivityDetails::Diaper {
                kind: Some(DiaperKind::Both),
                condition: Some(DiaperCondition::Normal),
            }),
        )
        .unwrap();
        db.log_activity(&diaper).unwrap();
    }

    let db = CareDb::open_at(&path).unwrap();
    assert_eq!(db.find_baby("theo").unwrap(), profile);
    let activities = db.recent_activities(&profile.id, 10).unwrap();
    assert_eq!(activities.len(), 1);
    assert!(matches!(
        activities[0].details,
        Some(ActivityDetails::Diaper {
            kind: Some(DiaperKind::Both),
            ..
        })
    ));
}

#[test]
fn test_recent_activities_newest_first_and_capped() {
    let db = CareDb::open_memory().unwrap();
    let profile = baby("Theo");
    db.add_baby(&profile).unwrap();
    for hours in [5, 1, 3, 2, 4] {
        let activity = CareActivity::new(
            &profile.id,
            ActivityCategory::Feeding,
            now() - Duration::hours(hours),
            None,
            None,
            None,
        )
        .unwrap();
        db.log_activity(&activity).unwrap();
    }

    let recent = db.recent_activities(&profile.id, 3).unwrap();
    let starts: Vec<DateTime<Utc>> = recent.iter().map(|a| a.start_time).collect();
    assert_eq!(
        starts,
        [
            now() - Duration::hours(1),
            now() - Duration::hours(2),
            now() - Duration::hours(3)
        ]
    );

    let today = db
        .activities_since(&profile.id, now() - Duration::hours(2))
        .unwrap();
    assert_eq!(today.len(), 2);
}

#[test]
fn test_snapshot_feeds_engine() {
    let db = CareDb::open_memory().unwrap();
    let profile = baby("Theo"); // 62 days old on now()
    db.add_baby(&profile).unwrap();
    db.create_reminder(
        ReminderDraft::from_preset(&profile.id, ReminderType::Medicine, None).unwrap(),
        now(),
    )
    .unwrap();

    let snapshot = CareSnapshot::load(&db, &profile.id, &LimitsConfig::default()).unwrap();
    let suggestions = snapshot
        .suggestions(&SuggestionEngine::default(), now())
        .unwrap();
    let kinds: Vec<ReminderType> = suggestions.iter().map(|s| s.kind).collect();
    // open medicine reminder suppresses vitamin D
    assert_eq!(kinds, [ReminderType::Milestone, ReminderType::Tip]);
}

#[test]
fn test_snapshot_for_unknown_baby_fails() {
    let db = CareDb::open_memory().unwrap();
    assert!(matches!(
        CareSnapshot::load(&db, "missing", &LimitsConfig::default()),
        Err(CoreError::NotFound { entity: "baby", .. })
    ));
}

#[test]
fn test_reminder_lifecycle() {
    let db = CareDb::open_memory().unwrap();
    let profile = baby("Theo");
    db.add_baby(&profile).unwrap();
    let draft = ReminderDraft::new(
        &profile.id,
        ReminderType::Appointment,
        "Pediatrician",
        "Two-month visit",
        Some(now() + Duration::days(2)),
    )
    .unwrap();
    let reminder = db.create_reminder(draft, now()).unwrap();

    db.set_reminder_completed(&reminder.id, true).unwrap();
    let board = ReminderBoard::build(&db.list_reminders(&profile.id).unwrap(), 5);
    assert!(board.pending.is_empty());
    assert_eq!(board.completed.len(), 1);

    db.set_reminder_completed(&reminder.id, false).unwrap();
    assert!(!db.list_reminders(&profile.id).unwrap()[0].is_completed);

    db.delete_reminder(&reminder.id).unwrap();
    assert!(db.list_reminders(&profile.id).unwrap().is_empty());
}

#[test]
fn test_deleting_baby_cascades() {
    let db = CareDb::open_memory().unwrap();
    let profile = baby("Theo");
    db.add_baby(&profile).unwrap();
    db.log_activity(
        &CareActivity::new(&profile.id, ActivityCategory::Play, now(), None, None, None).unwrap(),
    )
    .unwrap();
    db.create_reminder(
        ReminderDraft::from_preset(&profile.id, ReminderType::Tip, None).unwrap(),
        now(),
    )
    .unwrap();
    let assessment = CryAssessment::new(CryNeed::Attention, 0.6).unwrap();
    db.record_cry_analysis(&CryAnalysis::new(&profile.id, assessment, now()))
        .unwrap();

    db.delete_baby(&profile.id).unwrap();
    assert!(db.list_babies().unwrap().is_empty());
    assert!(db.recent_activities(&profile.id, 10).unwrap().is_empty());
    assert!(db.list_reminders(&profile.id).unwrap().is_empty());
    assert!(db.recent_cry_analyses(&profile.id, 10).unwrap().is_empty());
}

#[test]
fn test_cry_history_round_trip() {
    let db = CareDb::open_memory().unwrap();
    let profile = baby("Theo");
    db.add_baby(&profile).unwrap();
    for (minutes, need) in [(30, CryNeed::Hunger), (10, CryNeed::Sleep)] {
        let assessment = CryAssessment::new(need, 0.8).unwrap();
        db.record_cry_analysis(&CryAnalysis::new(
            &profile.id,
            assessment,
            now() - Duration::minutes(minutes),
        ))
        .unwrap();
    }

    let history = db.recent_cry_analyses(&profile.id, 10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].assessment.need, CryNeed::Sleep);
    assert_eq!(history[1].assessment.recommendations.len(), 3);
}

#[test]
fn test_find_baby_by_ambiguous_name_fails() {
    let db = CareDb::open_memory().unwrap();
    db.add_baby(&baby("Sam")).unwrap();
    db.add_baby(&baby("sam")).unwrap();
    assert!(matches!(
        db.find_baby("SAM"),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        db.find_baby("Alex"),
        Err(CoreError::NotFound { .. })
    ));
}

#[test]
fn test_update_baby() {
    let db = CareDb::open_memory().unwrap();
    let mut profile = baby("Theo");
    db.add_baby(&profile).unwrap();
    profile.name = "Theodore".into();
    profile.gender = Some("male".into());
    db.update_baby(&profile).unwrap();
    assert_eq!(db.get_baby(&profile.id).unwrap(), Some(profile));
}
