use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::AttendanceRecord;
use crate::utils::colors::{GREY, RESET, color_for_status};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        date: day,
        range,
        now,
    } = cmd
    {
        let store = open_ready_store(cfg)?;

        let records = if *now {
            store.get_by_date(&date::today())?
        } else if let Some(d) = day {
            store.get_by_date(&date::parse_date(d)?)?
        } else if let Some(r) = range {
            let (start, end) = date::parse_range(r)?;
            store.get_by_date_range(&start, &end)?
        } else {
            store.get_all()?
        };

        if records.is_empty() {
            println!("No records found.");
            return Ok(());
        }

        print_records(&records);
        println!("\n{} record(s)", records.len());
    }
    Ok(())
}

fn print_records(records: &[AttendanceRecord]) {
    for r in records {
        let color = color_for_status(r.status.is_eligible());
        println!(
            "{}#{:<5}{} {} | {:<12} | {:<24} | {}{:<12}{} | {:<9} | {}",
            GREY,
            r.id,
            RESET,
            r.timestamp.format("%Y-%m-%d %H:%M:%S"),
            r.student_id,
            r.full_name,
            color,
            r.status.to_db_str(),
            RESET,
            r.verification_method.to_db_str(),
            r.academic_year,
        );
    }
}
