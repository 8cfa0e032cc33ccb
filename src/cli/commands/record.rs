use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{VerificationEvent, VerificationMethod};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        student_id,
        full_name,
        eligible,
        not_eligible,
        year,
        method,
    } = cmd
    {
        if !eligible && !not_eligible {
            return Err(AppError::InvalidStatus(
                "pass either --eligible or --not-eligible".to_string(),
            ));
        }

        let method = match method {
            Some(code) => VerificationMethod::from_code(code).ok_or_else(|| {
                AppError::InvalidMethod(format!(
                    "'{}'. Use 'exam-card' or 'manual'.",
                    code
                ))
            })?,
            None => VerificationMethod::from_code(&cfg.default_method)
                .unwrap_or(VerificationMethod::ExamCard),
        };

        let event = VerificationEvent {
            student_id: student_id.clone(),
            full_name: full_name.clone(),
            is_eligible: *eligible,
            academic_year: year.clone().unwrap_or_else(|| cfg.academic_year.clone()),
            method,
        };

        let store = open_ready_store(cfg)?;
        let id = store.insert(&event)?;

        let status = if *eligible { "eligible" } else { "not eligible" };
        success(format!(
            "Recorded #{id}: {student_id} ({full_name}) is {status}"
        ));
    }
    Ok(())
}
