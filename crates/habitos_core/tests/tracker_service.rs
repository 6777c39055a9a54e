use habitos_core::db::open_db_in_memory;
use habitos_core::{
    CheckToggle, Intensity, MonthError, SnapshotRepository, SqliteSnapshotRepository,
    TrackerError, TrackerService, XP_PER_CHECK,
};
use rusqlite::Connection;

fn fresh_service(conn: &Connection) -> TrackerService<SqliteSnapshotRepository<'_>> {
    TrackerService::load(SqliteSnapshotRepository::new(conn)).unwrap()
}

#[test]
fn toggle_check_awards_and_refunds_xp() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);
    let xp_before = service.state().user.xp;

    assert_eq!(service.toggle_check(0, 5).unwrap(), CheckToggle::Added);
    assert_eq!(service.state().user.xp, xp_before + XP_PER_CHECK);
    assert!(service.state().current().habits[0].is_checked(5));

    assert_eq!(service.toggle_check(0, 5).unwrap(), CheckToggle::Removed);
    assert_eq!(service.state().user.xp, xp_before);
    assert!(service.state().current().habits[0].checks.is_empty());
}

#[test]
fn add_habit_then_check_on_an_empty_month() {
    let conn = open_db_in_memory().unwrap();
    // A snapshot with an empty `data` object backfills to 12 habit-less
    // months, giving a month with zero habits to start from.
    let empty = serde_json::json!({
        "currentMonth": 0,
        "year": 2026,
        "user": { "name": "Ada", "xp": 0, "level": 1, "theme": "#6366f1" },
        "data": {}
    });
    SqliteSnapshotRepository::new(&conn)
        .save_slot(&empty.to_string())
        .unwrap();
    let mut service = fresh_service(&conn);
    assert!(service.state().current().habits.is_empty());

    assert!(service.add_habit("Deep Work").unwrap());
    assert_eq!(service.state().current().habits.len(), 1);

    service.toggle_check(0, 5).unwrap();
    let habit = &service.state().current().habits[0];
    assert_eq!(habit.checks.iter().copied().collect::<Vec<_>>(), vec![5]);
    assert_eq!(service.state().user.xp, XP_PER_CHECK);

    service.toggle_check(0, 5).unwrap();
    assert!(service.state().current().habits[0].checks.is_empty());
    assert_eq!(service.state().user.xp, 0);
}

#[test]
fn toggle_check_rejects_out_of_range_habit_index() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);
    let len = service.state().current().habits.len();

    let err = service.toggle_check(len, 1).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Month(MonthError::HabitIndexOutOfRange { .. })
    ));
}

#[test]
fn level_up_fires_once_at_the_threshold() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);

    // 9 checks bring xp to 90; the 10th crosses 100 and levels up.
    for day in 1..=9 {
        service.toggle_check(0, day).unwrap();
    }
    assert_eq!(service.state().user.xp, 90);
    assert_eq!(service.state().user.level, 1);

    service.toggle_check(0, 10).unwrap();
    assert_eq!(service.state().user.xp, 100);
    assert_eq!(service.state().user.level, 2);

    // xp is kept, not reset against the new threshold.
    service.toggle_check(0, 11).unwrap();
    assert_eq!(service.state().user.xp, 110);
    assert_eq!(service.state().user.level, 2);
}

#[test]
fn empty_adds_are_rejected_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);
    let habit_count = service.state().current().habits.len();

    assert!(!service.add_habit("").unwrap());
    assert_eq!(service.state().current().habits.len(), habit_count);

    assert!(!service.add_task("   ", Intensity::Low).unwrap());
    assert!(service.state().current().todos.is_empty());

    assert!(!service.set_user_name("").unwrap());
    assert_ne!(service.state().user.name, "");
}

#[test]
fn task_operations_address_the_current_month() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);

    assert!(service.add_task("write summary", Intensity::Med).unwrap());
    service.toggle_task_done(0).unwrap();
    assert!(service.state().current().todos[0].done);

    service.edit_task_text(0, "").unwrap();
    assert_eq!(service.state().current().todos[0].text, "");

    service.cycle_task_intensity(0).unwrap();
    assert_eq!(service.state().current().todos[0].intensity, Intensity::High);
    service.cycle_task_intensity(0).unwrap();
    assert_eq!(service.state().current().todos[0].intensity, Intensity::Low);

    let err = service.delete_task(3).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Month(MonthError::TaskIndexOutOfRange { index: 3, len: 1 })
    ));
    service.delete_task(0).unwrap();
    assert!(service.state().current().todos.is_empty());
}

#[test]
fn month_cursor_is_clamped_and_scopes_mutations() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);

    service.change_month(-100);
    assert_eq!(service.current_month_index(), 0);
    service.set_note("january note").unwrap();

    service.change_month(1);
    assert_eq!(service.current_month_index(), 1);
    assert_eq!(service.state().current().note, "");
    assert_eq!(service.month(0).unwrap().note, "january note");

    service.change_month(100);
    assert_eq!(service.current_month_index(), 11);

    service.set_current_month(6);
    assert_eq!(service.current_month_index(), 6);
    service.set_current_month(99);
    assert_eq!(service.current_month_index(), 11);
}

#[test]
fn stats_and_report_are_exposed_per_month() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);

    service.toggle_check(0, 1).unwrap();
    service.toggle_check(1, 2).unwrap();
    service.add_task("export", Intensity::Low).unwrap();

    let index = service.current_month_index();
    let stats = service.month_stats(index).unwrap();
    assert_eq!(stats.total_checks, 2);
    assert_eq!(stats.longest_streak, 2);
    assert!(stats.completion_rate <= 100);

    let report = service.month_report(index).unwrap();
    assert_eq!(report.habits.len(), service.state().current().habits.len());
    assert!(report.habits[0].days[0]);
    assert!(report.habits[1].days[1]);
    assert_eq!(report.tasks.len(), 1);

    assert!(service.month_stats(12).is_none());
}

#[test]
fn profile_updates_persist() {
    let conn = open_db_in_memory().unwrap();
    let mut service = fresh_service(&conn);

    assert!(service.set_user_name("Ada").unwrap());
    service.set_theme("#10b981").unwrap();

    let service = fresh_service(&conn);
    assert_eq!(service.state().user.name, "Ada");
    assert_eq!(service.state().user.theme, "#10b981");
}
