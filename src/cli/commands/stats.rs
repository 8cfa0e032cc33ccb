use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use crate::utils::date;
use serde::Serialize;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        date: day,
        detailed,
        json,
    } = cmd
    {
        let store = open_ready_store(cfg)?;

        let filter_date = day.as_deref().map(date::parse_date).transpose()?;

        let summary = store.get_statistics()?;
        let breakdowns = if *detailed {
            Some(store.get_detailed_statistics(filter_date.as_ref())?)
        } else {
            None
        };

        if *json {
            #[derive(Serialize)]
            struct StatsOutput<'a> {
                summary: &'a crate::models::Statistics,
                #[serde(skip_serializing_if = "Option::is_none")]
                detailed: Option<&'a crate::models::DetailedStatistics>,
            }

            let out = serde_json::to_string_pretty(&StatsOutput {
                summary: &summary,
                detailed: breakdowns.as_ref(),
            })
            .map_err(|e| AppError::Other(format!("stats serialization failed: {e}")))?;
            println!("{out}");
            return Ok(());
        }

        println!();
        println!("{}• Total records:{} {}", CYAN, RESET, summary.total);
        println!(
            "{}• Eligible:{}      {}{}{}",
            CYAN, RESET, GREEN, summary.eligible, RESET
        );
        println!(
            "{}• Not eligible:{}  {}{}{}",
            CYAN, RESET, RED, summary.ineligible, RESET
        );
        println!("{}• Today:{}         {}", CYAN, RESET, summary.todays_count);

        if let Some(d) = breakdowns {
            let scope = match &filter_date {
                Some(day) => format!("for {day}"),
                None => "all dates".to_string(),
            };
            println!("\n{}Breakdowns ({}):{}", CYAN, scope, RESET);
            println!(
                "  by status : eligible={} not_eligible={}",
                d.by_status.eligible, d.by_status.not_eligible
            );
            println!(
                "  by method : exam_card={} manual={}",
                d.by_method.exam_card, d.by_method.manual
            );

            println!("  by hour   :");
            for (hour, count) in d.hourly.iter().enumerate() {
                if *count > 0 {
                    println!("    {:02}:00  {}", hour, count);
                }
            }
        }

        println!();
    }
    Ok(())
}
