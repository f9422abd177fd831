use anchor_lang::prelude::*;

use crate::{
    state::{DeadlineExtendedEvent, SurveyClosedEvent, SurveyReopenedEvent},
    survey::{CloseSurvey, ExtendDeadline, ReopenSurvey},
};

/// Stops the survey from accepting responses. Tallies and viewer grants
/// are untouched; decryption keeps working on the frozen aggregate.
#[allow(unused_variables)]
pub fn close_survey(ctx: Context<CloseSurvey>, survey_id: u32) -> Result<()> {
    ctx.accounts.survey_acc.close()?;

    let clock = Clock::get()?;
    emit!(SurveyClosedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Reopens a closed survey. The deadline is not touched: if it has already
/// passed, the authority also needs `extend_deadline` before responses are
/// accepted again.
#[allow(unused_variables)]
pub fn reopen_survey(ctx: Context<ReopenSurvey>, survey_id: u32) -> Result<()> {
    ctx.accounts.survey_acc.reopen()?;

    let clock = Clock::get()?;
    emit!(SurveyReopenedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Moves the deadline forward. Shortening a survey is not supported.
#[allow(unused_variables)]
pub fn extend_deadline(
    ctx: Context<ExtendDeadline>,
    survey_id: u32,
    new_deadline: i64,
) -> Result<()> {
    ctx.accounts.survey_acc.extend_deadline(new_deadline)?;

    emit!(DeadlineExtendedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        new_deadline,
    });

    Ok(())
}
