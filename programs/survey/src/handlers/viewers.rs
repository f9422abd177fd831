use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    state::{ViewerAuthorizedEvent, ViewerRevokedEvent, ViewerRole},
    survey::{AuthorizeViewer, RevokeViewer},
};

/// Grants (or refreshes) a viewer's right to decrypt the tallies.
///
/// Only the survey authority can grant. Re-authorizing an existing viewer
/// updates its role and expiry in place. `expires_at == 0` means the grant
/// never expires.
#[allow(unused_variables)]
pub fn authorize_viewer(
    ctx: Context<AuthorizeViewer>,
    survey_id: u32,
    viewer: Pubkey,
    role: ViewerRole,
    expires_at: i64,
) -> Result<()> {
    let clock = Clock::get()?;
    if expires_at != 0 {
        require!(expires_at > clock.unix_timestamp, ErrorCode::InvalidExpiry);
    }

    // A freshly initialized grant still has granted_at == 0
    let newly_granted = ctx.accounts.viewer_grant.granted_at == 0;
    if newly_granted {
        ctx.accounts.survey_acc.viewer_count += 1;
    }

    let survey_key = ctx.accounts.survey_acc.key();
    let grant = &mut ctx.accounts.viewer_grant;
    grant.bump = ctx.bumps.viewer_grant;
    grant.survey = survey_key;
    grant.viewer = viewer;
    grant.role = role;
    grant.expires_at = expires_at;
    grant.granted_at = clock.unix_timestamp;

    emit!(ViewerAuthorizedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        viewer,
        role,
        expires_at,
    });

    Ok(())
}

/// Revokes a viewer's grant and reclaims its rent.
///
/// The grant account is closed by the `close = authority` constraint; once
/// it is gone, decryption requests from that viewer fail the grant lookup.
#[allow(unused_variables)]
pub fn revoke_viewer(ctx: Context<RevokeViewer>, survey_id: u32, viewer: Pubkey) -> Result<()> {
    ctx.accounts.survey_acc.viewer_count =
        ctx.accounts.survey_acc.viewer_count.saturating_sub(1);

    emit!(ViewerRevokedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        viewer,
    });

    Ok(())
}
