//! End-to-end planning scenarios through the `Planner` facade.

use async_trait::async_trait;
use cabinet_planner::invitation::{
    dispatch_invitation, InvitationOutcome, InvitationRequest, InvitationService,
};
use cabinet_planner::models::{
    CollaboratorRegistry, Event, EventKind, PlanningWindow, Selection, Task, TaskType, Urgency,
};
use cabinet_planner::scheduler::{AssignOutcome, CommitReason, OverflowResolution};
use cabinet_planner::search::TaskFilters;
use cabinet_planner::{Planner, PlannerConfig, PlannerError};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

// ======================== Helpers ========================

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// Monday 2026-03-02, 09:00 UTC.
fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn bruno_planner() -> Planner {
    let registry = CollaboratorRegistry::default().with_collaborator("BRUNO", 3.5);
    Planner::new(registry).unwrap().with_fixed_time(monday_morning())
}

fn firm_planner() -> Planner {
    let config = PlannerConfig::from_yaml_str(
        r#"
collaborators:
  - id: BRUNO
    daily_capacity_hours: 3.5
  - id: CLAIRE
    daily_capacity_hours: 7
  - id: DAVID
    daily_capacity_hours: 5
"#,
    )
    .unwrap();
    Planner::from_config(&config)
        .unwrap()
        .with_fixed_time(monday_morning())
}

fn tva(id: &str, who: &str, hours: f64) -> Task {
    Task::new(id, TaskType::Tva, who, d(31)).with_duration(hours)
}

fn committed_reason(outcome: &AssignOutcome) -> Option<CommitReason> {
    match outcome {
        AssignOutcome::Committed(c) => Some(c.reason),
        AssignOutcome::OverflowDetected(_) => None,
    }
}

// ======================== Assignment and overflow ========================

#[test]
fn test_second_task_overflows_single_collaborator() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();
    planner.add_task(tva("T2", "BRUNO", 2.0)).unwrap();

    let first = planner.assign("T1", d(3), None).unwrap();
    assert_eq!(committed_reason(&first), Some(CommitReason::WithinCapacity));

    let proposal = planner
        .assign("T2", d(3), None)
        .unwrap()
        .into_overflow()
        .expect("second task must overflow");
    assert_eq!(proposal.task_id(), "T2");
    assert!((proposal.current_load_hours() - 2.0).abs() < 1e-10);
    assert!((proposal.max_capacity_hours() - 3.5).abs() < 1e-10);
    assert!((proposal.proposed_duration() - 2.0).abs() < 1e-10);
    assert_eq!(proposal.task_count(), 1);

    // Nothing was mutated by the detection
    assert!(planner.task("T2").unwrap().scheduled_day.is_none());
}

#[test]
fn test_confirm_overflow_with_new_duration() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();
    planner.add_task(tva("T2", "BRUNO", 2.0)).unwrap();
    planner.assign("T1", d(3), None).unwrap();

    let mut proposal = planner.assign("T2", d(3), None).unwrap().into_overflow().unwrap();
    proposal.set_candidate_duration(1.0).unwrap();
    assert!(!proposal.still_overflows());

    let resolution = planner.confirm_overflow(proposal).unwrap();
    match resolution {
        OverflowResolution::Confirmed(c) => {
            assert_eq!(c.reason, CommitReason::OverflowConfirmed);
            assert!((c.duration_hours - 1.0).abs() < 1e-10);
        }
        other => panic!("expected confirmation, got {other:?}"),
    }

    let plan = planner.compute_day_plan(d(3), &Selection::single("BRUNO"));
    assert!((plan.total_load_hours - 3.0).abs() < 1e-10);
    assert!(!plan.is_overloaded());
}

#[test]
fn test_urgent_task_due_tomorrow_bypasses_full_day() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();
    planner.add_task(tva("T2", "BRUNO", 2.0)).unwrap();
    planner.assign("T1", d(3), None).unwrap();
    let proposal = planner.assign("T2", d(3), None).unwrap().into_overflow().unwrap();
    planner.confirm_overflow(proposal).unwrap();

    let plan = planner.compute_day_plan(d(3), &Selection::All);
    assert!((plan.total_load_hours - 4.0).abs() < 1e-10);

    // Due 2026-03-03 00:00 UTC: 15h from now
    planner
        .add_task(
            Task::new("U", TaskType::Tva, "BRUNO", d(3))
                .with_urgency(Urgency::Urgent)
                .with_duration(1.0),
        )
        .unwrap();
    let outcome = planner.assign("U", d(3), None).unwrap();
    assert_eq!(committed_reason(&outcome), Some(CommitReason::UrgencyOverride));

    let plan = planner.compute_day_plan(d(3), &Selection::All);
    assert!((plan.total_load_hours - 5.0).abs() < 1e-10);
    assert!(plan.is_overloaded());
}

#[test]
fn test_urgent_task_due_later_still_checked() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 3.0)).unwrap();
    planner.assign("T1", d(3), None).unwrap();
    planner
        .add_task(
            Task::new("U", TaskType::Tva, "BRUNO", d(10))
                .with_urgency(Urgency::Urgent)
                .with_duration(1.0),
        )
        .unwrap();

    let outcome = planner.assign("U", d(3), None).unwrap();
    assert!(!outcome.is_committed());
}

#[test]
fn test_reassign_does_not_count_itself() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 3.0)).unwrap();
    planner.assign("T1", d(3), None).unwrap();

    // Same day, same task: 3h against an otherwise empty 3.5h day
    let outcome = planner.assign("T1", d(3), Some(3.5)).unwrap();
    assert!(outcome.is_committed());
    assert!((planner.task("T1").unwrap().estimated_duration_hours - 3.5).abs() < 1e-10);
}

#[test]
fn test_assign_errors_do_not_mutate() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();

    assert!(matches!(
        planner.assign("NOPE", d(3), None),
        Err(PlannerError::UnknownTask(_))
    ));
    assert!(matches!(
        planner.assign("T1", d(3), Some(0.0)),
        Err(PlannerError::InvalidDuration(_))
    ));
    let t1 = planner.task("T1").unwrap();
    assert!(t1.scheduled_day.is_none());
    assert!((t1.estimated_duration_hours - 2.0).abs() < 1e-10);
}

// ======================== Auto-scheduling ========================

#[test]
fn test_auto_schedule_single_day_places_one_of_three() {
    let mut planner = bruno_planner();
    for id in ["A", "B", "C"] {
        planner.add_task(tva(id, "BRUNO", 2.0)).unwrap();
    }

    let outcome = planner.auto_schedule(&[d(3)]).unwrap();
    assert_eq!(outcome.placed_count(), 1);
    assert_eq!(outcome.unplaced_count(), 2);
    assert_eq!(planner.store().available_tasks().count(), 2);
}

#[test]
fn test_auto_schedule_high_before_medium() {
    let mut planner = bruno_planner();
    planner
        .add_task(tva("MED", "BRUNO", 3.0).with_urgency(Urgency::Medium))
        .unwrap();
    planner
        .add_task(tva("HIGH", "BRUNO", 3.0).with_urgency(Urgency::High))
        .unwrap();

    let outcome = planner.auto_schedule(&[d(3), d(4)]).unwrap();
    assert_eq!(outcome.day_of("HIGH"), Some(d(3)));
    assert_eq!(outcome.day_of("MED"), Some(d(4)));
}

#[test]
fn test_auto_schedule_is_deterministic() {
    let build = || {
        let mut planner = firm_planner();
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..20 {
            let who = ["BRUNO", "CLAIRE", "DAVID"][rng.random_range(0..3)];
            let hours = f64::from(rng.random_range(1..=8u32)) * 0.5;
            let due = d(rng.random_range(10..=31));
            planner
                .add_task(Task::new(format!("T{i}"), TaskType::Other, who, due).with_duration(hours))
                .unwrap();
        }
        planner
    };

    let week = PlanningWindow::week_of(d(4)).days();
    let mut first = build();
    let mut second = build();
    let a = first.auto_schedule(&week).unwrap();
    let b = second.auto_schedule(&week).unwrap();

    let placements = |outcome: &cabinet_planner::scheduler::AutoScheduleOutcome| {
        outcome
            .placed
            .iter()
            .map(|t| (t.id.clone(), t.scheduled_day))
            .collect::<Vec<_>>()
    };
    assert_eq!(placements(&a), placements(&b));
    assert_eq!(a.unplaced_count(), b.unplaced_count());
}

#[test]
fn test_auto_schedule_skips_weekend_by_default() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();

    // Saturday and Sunday only
    let outcome = planner.auto_schedule(&[d(7), d(8)]).unwrap();
    assert_eq!(outcome.placed_count(), 0);
    assert_eq!(outcome.unplaced_count(), 1);
}

#[test]
fn test_auto_schedule_respects_capacity_randomized() {
    let mut rng = StdRng::seed_from_u64(2026);

    for round in 0..25 {
        let mut planner = firm_planner();
        let task_count = rng.random_range(5..40);
        for i in 0..task_count {
            let who = ["BRUNO", "CLAIRE", "DAVID"][rng.random_range(0..3)];
            let urgency = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Urgent]
                [rng.random_range(0..4)];
            let hours = f64::from(rng.random_range(1..=10u32)) * 0.5;
            // Due dates past the override window, so capacity always applies
            let due = d(rng.random_range(10..=31));
            planner
                .add_task(
                    Task::new(format!("R{round}-{i}"), TaskType::Other, who, due)
                        .with_urgency(urgency)
                        .with_duration(hours),
                )
                .unwrap();
        }

        let week = PlanningWindow::week_of(d(2)).weekdays();
        let outcome = planner.auto_schedule(&week).unwrap();
        assert_eq!(outcome.placed_count() + outcome.unplaced_count(), task_count);

        for day in &week {
            for who in ["BRUNO", "CLAIRE", "DAVID"] {
                let plan = planner.compute_day_plan(*day, &Selection::single(who));
                assert!(
                    plan.total_load_hours <= plan.max_capacity_hours + 1e-9,
                    "{who} overbooked on {day}: {}h / {}h",
                    plan.total_load_hours,
                    plan.max_capacity_hours
                );
            }
        }
    }
}

/// Checks every collaborator-day of `days`.
///
/// `excused` holds tasks whose placement was allowed past capacity: urgency
/// overrides, confirmed overflows, and placed tasks whose duration was
/// raised afterwards. The remaining tasks must fit, so an overloaded day
/// always carries at least one excused task.
fn assert_capacity_invariant(planner: &Planner, days: &[NaiveDate], excused: &HashSet<String>) {
    for &day in days {
        for who in ["BRUNO", "CLAIRE", "DAVID"] {
            let plan = planner.compute_day_plan(day, &Selection::single(who));
            let checked: f64 = plan
                .tasks
                .iter()
                .filter(|t| !excused.contains(&t.id))
                .map(|t| t.estimated_duration_hours)
                .sum();
            assert!(
                checked <= plan.max_capacity_hours + 1e-9,
                "{who} on {day}: {checked}h of capacity-checked work for {}h",
                plan.max_capacity_hours
            );
            if plan.is_overloaded() {
                assert!(
                    plan.tasks.iter().any(|t| excused.contains(&t.id)),
                    "{who} overloaded on {day} without an override or confirmed overflow"
                );
            }
        }
    }
}

#[test]
fn test_capacity_invariant_under_mixed_commands() {
    let days: Vec<NaiveDate> = (2..=6).map(d).collect();
    let people = ["BRUNO", "CLAIRE", "DAVID"];
    let urgencies = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Urgent];
    // Due on the 2nd or 3rd falls inside the 24h override window
    let due_dates = [d(2), d(3), d(20)];

    for seed in 0..10u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut planner = firm_planner();
        let mut excused: HashSet<String> = HashSet::new();
        let mut next_id = 0;

        for _ in 0..200 {
            let ids: Vec<String> = planner.store().task_ids().map(str::to_string).collect();
            let command = if ids.is_empty() { 0 } else { rng.random_range(0..5) };

            if command == 0 {
                let task = Task::new(
                    format!("M{next_id}"),
                    TaskType::Other,
                    people[rng.random_range(0..people.len())],
                    due_dates[rng.random_range(0..due_dates.len())],
                )
                .with_urgency(urgencies[rng.random_range(0..urgencies.len())])
                .with_duration(f64::from(rng.random_range(1..=8u32)) * 0.5);
                planner.add_task(task).unwrap();
                next_id += 1;
            } else {
                let id = ids[rng.random_range(0..ids.len())].clone();
                match command {
                    1 => {
                        let day = days[rng.random_range(0..days.len())];
                        match planner.assign(&id, day, None).unwrap() {
                            AssignOutcome::Committed(c) if c.reason == CommitReason::WithinCapacity => {
                                excused.remove(&id);
                            }
                            AssignOutcome::Committed(_) => {
                                excused.insert(id);
                            }
                            AssignOutcome::OverflowDetected(mut proposal) => {
                                if rng.random_bool(0.5) {
                                    let hours = f64::from(rng.random_range(1..=6u32)) * 0.5;
                                    proposal.set_candidate_duration(hours).unwrap();
                                    assert!(planner.confirm_overflow(proposal).unwrap().is_confirmed());
                                    excused.insert(id);
                                } else {
                                    assert!(!proposal.cancel().is_confirmed());
                                }
                            }
                        }
                    }
                    2 => {
                        let before = planner.task(&id).unwrap().estimated_duration_hours;
                        let hours = f64::from(rng.random_range(1..=8u32)) * 0.5;
                        planner.modify_duration(&id, hours).unwrap();
                        if planner.task(&id).unwrap().is_placed() && hours > before {
                            excused.insert(id);
                        }
                    }
                    3 => {
                        assert!(planner.remove_task(&id).is_some());
                        excused.remove(&id);
                    }
                    _ => {
                        planner.unassign(&id).unwrap();
                        excused.remove(&id);
                    }
                }
            }

            assert_capacity_invariant(&planner, &days, &excused);
        }
    }
}

// ======================== Store operations ========================

#[test]
fn test_remove_task_is_idempotent() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();
    planner.assign("T1", d(3), None).unwrap();

    assert!(planner.remove_task("T1").is_some());
    assert!(planner.remove_task("T1").is_none());
    let plan = planner.compute_day_plan(d(3), &Selection::All);
    assert!(plan.tasks.is_empty());
}

#[test]
fn test_duration_edit_round_trip() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();
    planner.assign("T1", d(3), None).unwrap();

    planner.modify_duration("T1", 1.5).unwrap();
    planner.modify_duration("T1", 2.0).unwrap();
    let t1 = planner.task("T1").unwrap();
    assert!((t1.estimated_duration_hours - 2.0).abs() < 1e-10);
    assert_eq!(t1.scheduled_day, Some(d(3)));
}

#[test]
fn test_import_of_placed_task_rejected() {
    let mut planner = bruno_planner();
    let mut closing = Task::new("C1", TaskType::Cloture, "BRUNO", d(31));
    closing.scheduled_day = Some(d(3));

    assert!(matches!(
        planner.add_task(closing),
        Err(PlannerError::TaskAlreadyScheduled(id)) if id == "C1"
    ));
    assert!(planner.task("C1").is_none());

    let plan = planner.compute_day_plan(d(3), &Selection::single("BRUNO"));
    assert!((plan.total_load_hours - 0.0).abs() < 1e-10);
    assert!(!plan.is_overloaded());
}

#[test]
fn test_duplicate_task_rejected() {
    let mut planner = bruno_planner();
    planner.add_task(tva("T1", "BRUNO", 2.0)).unwrap();
    assert!(matches!(
        planner.add_task(tva("T1", "BRUNO", 1.0)),
        Err(PlannerError::DuplicateTask(_))
    ));
}

#[test]
fn test_events_consume_capacity() {
    let mut planner = firm_planner();
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    planner
        .add_event(Event::new("E1", "Formation", EventKind::Internal, d(3), nine, noon).unwrap())
        .unwrap();
    planner.add_task(tva("T1", "BRUNO", 1.0)).unwrap();

    // Firm-wide 3h event leaves BRUNO 0.5h
    let proposal = planner.assign("T1", d(3), None).unwrap().into_overflow().unwrap();
    assert!((proposal.current_load_hours() - 3.0).abs() < 1e-10);
    assert_eq!(planner.compute_day_plan(d(3), &Selection::single("CLAIRE")).events.len(), 1);
}

// ======================== Search ========================

#[test]
fn test_search_by_type_label() {
    let planner = firm_planner();
    let pool = vec![
        Task::new("1", TaskType::Tva, "BRUNO", d(20)).with_urgency(Urgency::Medium),
        Task::new("2", TaskType::Ipp, "CLAIRE", d(10)).with_urgency(Urgency::Urgent),
        Task::new("3", TaskType::Tva, "DAVID", d(25)).with_urgency(Urgency::Urgent),
        Task::new("4", TaskType::Isoc, "BRUNO", d(5)).with_urgency(Urgency::High),
    ];

    let results = planner.search(&pool, "TVA", &TaskFilters::new());
    assert_eq!(results.ids(), vec!["3", "1"]);
    assert!(results.iter().all(|t| t.task_type == TaskType::Tva));
}

#[test]
fn test_search_then_import() {
    let mut planner = firm_planner();
    let pool = vec![
        tva("A", "BRUNO", 1.0).with_urgency(Urgency::High),
        tva("B", "CLAIRE", 1.0),
    ];

    let found = planner.search(&pool, "", &TaskFilters::new()).to_vec();
    for task in found {
        planner.add_task(task).unwrap();
    }
    assert!(planner.search(&pool, "", &TaskFilters::new()).is_empty());
}

// ======================== Invitations ========================

struct RecordingService;

#[async_trait]
impl InvitationService for RecordingService {
    async fn send_invitation(&self, request: &InvitationRequest) -> InvitationOutcome {
        InvitationOutcome::sent(format!("https://meet.example/{}", request.event_id))
    }
}

#[tokio::test]
async fn test_client_meeting_invitation_flow() {
    let mut planner = firm_planner();
    let two = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
    let three = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
    planner
        .add_event(Event::new("E1", "Bilan 2025", EventKind::Client, d(5), two, three).unwrap())
        .unwrap();

    let request = planner.invitation_request("E1", "CLAIRE").unwrap();
    assert_eq!(request.participants.len(), 3);

    let outcome = dispatch_invitation(&RecordingService, &request).await;
    assert!(planner.apply_invitation_outcome("E1", &outcome));
    assert_eq!(
        planner.event("E1").unwrap().external_meeting_link.as_deref(),
        Some("https://meet.example/E1")
    );
}
