//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitos_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use habitos_core::db::open_db_in_memory;
use habitos_core::{SqliteSnapshotRepository, TrackerService};

fn main() {
    println!("habitos_core version={}", habitos_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    };
    let repo = SqliteSnapshotRepository::new(&conn);
    match TrackerService::load(repo) {
        Ok(service) => {
            let stats = service.current_month_stats();
            println!(
                "habits={} completion_rate={} longest_streak={}",
                service.state().current().habits.len(),
                stats.completion_rate,
                stats.longest_streak
            );
        }
        Err(err) => {
            eprintln!("failed to load tracker state: {err}");
            std::process::exit(1);
        }
    }
}
