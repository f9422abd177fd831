use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    state::ResponseWithdrawnEvent,
    survey::WithdrawResponse,
};

/// Withdraws the caller's active response.
///
/// Clears the responded flag and the stored selection handle so the caller
/// may submit a fresh response. The aggregated tally is NOT reversed: the
/// withdrawn selections stay counted until the survey ends. This is a known
/// simplification; reversing would require a subtraction computation keyed
/// to the original selection.
#[allow(unused_variables)]
pub fn withdraw_response(ctx: Context<WithdrawResponse>, survey_id: u32) -> Result<()> {
    require!(
        ctx.accounts.respondent_record.has_responded,
        ErrorCode::NoActiveResponse
    );

    ctx.accounts.respondent_record.clear();
    ctx.accounts.survey_acc.respondent_count =
        ctx.accounts.survey_acc.respondent_count.saturating_sub(1);

    let clock = Clock::get()?;
    emit!(ResponseWithdrawnEvent {
        survey_id: ctx.accounts.survey_acc.id,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
