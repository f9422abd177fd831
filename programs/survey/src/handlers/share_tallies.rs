use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    error::ErrorCode,
    state::{Survey, TalliesSharedEvent},
    survey::{
        InitShareTalliesCompDef, ShareTallies, ShareTalliesCallback, ShareTalliesOutput,
    },
};

/// One-off job to create computation definition for `share_tallies` in
/// encrypted-ixs/src/lib.rs.
///
/// This initializes the onchain computation definition account that registers
/// the encrypted instruction. Must be called once before tallies can be
/// shared with viewers.
pub fn init_share_tallies_comp_def(ctx: Context<InitShareTalliesCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, None, None)?;
    Ok(())
}

/// Requests the current tallies re-encrypted to the caller's key.
///
/// The survey authority is always allowed; anyone else must hold an
/// unexpired grant for this survey. The MPC cluster re-seals the counters
/// under the supplied x25519 key, so the plaintext counts never appear
/// on-chain and only the requesting viewer can decrypt them.
///
/// # Arguments
/// * `survey_id` - The survey ID (used for account derivation via Anchor's #[instruction] attribute)
/// * `viewer_encryption_pubkey` - x25519 key to re-encrypt the tallies for
/// * `viewer_nonce` - Cryptographic nonce for the re-encryption
#[allow(unused_variables)]
pub fn share_tallies(
    ctx: Context<ShareTallies>,
    computation_offset: u64,
    survey_id: u32,
    viewer_encryption_pubkey: [u8; 32],
    viewer_nonce: u128,
) -> Result<()> {
    let payer_key = ctx.accounts.payer.key();
    let survey_key = ctx.accounts.survey_acc.key();

    // The authority is implicitly authorized; everyone else needs a grant
    // for this survey that has not expired.
    if payer_key != ctx.accounts.survey_acc.authority {
        let grant = ctx
            .accounts
            .viewer_grant
            .as_ref()
            .ok_or(ErrorCode::ViewerNotAuthorized)?;
        require!(grant.survey == survey_key, ErrorCode::ViewerNotAuthorized);
        require!(grant.viewer == payer_key, ErrorCode::ViewerNotAuthorized);

        let clock = Clock::get()?;
        require!(
            grant.is_active_at(clock.unix_timestamp),
            ErrorCode::ViewerGrantExpired
        );
    }

    msg!("Sharing encrypted tallies for survey with id {}", survey_id);

    let computation_args = ArgBuilder::new()
        .x25519_pubkey(viewer_encryption_pubkey)
        .plaintext_u128(viewer_nonce)
        .plaintext_u128(ctx.accounts.survey_acc.nonce)
        .account(
            ctx.accounts.survey_acc.key(),
            // Offset calculation: discriminator + 1 byte (bump)
            (Survey::DISCRIMINATOR.len() + 1) as u32,
            32 * 8, // 8 tally slots, each stored as a 32-byte ciphertext
        )
        .build();

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    queue_computation(
        ctx.accounts,
        computation_offset,
        computation_args,
        None,
        vec![ShareTalliesCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[CallbackAccount {
                pubkey: ctx.accounts.survey_acc.key(),
                is_writable: false,
            }],
        )?],
        1,
        0,
    )?;
    Ok(())
}

pub fn share_tallies_callback(
    ctx: Context<ShareTalliesCallback>,
    output: SignedComputationOutputs<ShareTalliesOutput>,
) -> Result<()> {
    let shared = match output.verify_output(
        &ctx.accounts.cluster_account,
        &ctx.accounts.computation_account,
    ) {
        Ok(ShareTalliesOutput { field_0 }) => field_0,
        Err(_) => return Err(ErrorCode::AbortedComputation.into()),
    };

    emit!(TalliesSharedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        encryption_key: shared.encryption_key,
        nonce: shared.nonce,
        tallies: shared.ciphertexts,
    });

    Ok(())
}
