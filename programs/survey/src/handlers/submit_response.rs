use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    error::ErrorCode,
    state::{ResponseSubmittedEvent, Survey},
    survey::{
        InitSubmitResponseCompDef, SubmitResponse, SubmitResponseCallback, SubmitResponseOutput,
    },
};

/// One-off job to create computation definition for `submit_response` in
/// encrypted-ixs/src/lib.rs.
///
/// This initializes the onchain computation definition account that registers
/// the encrypted instruction. Must be called once before responses can be
/// submitted.
pub fn init_submit_response_comp_def(ctx: Context<InitSubmitResponseCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, None, None)?;
    Ok(())
}

/// Submits an encrypted response to the survey.
///
/// The selection is a bitmask over option indices, so one response may cover
/// several options at once; each set bit adds 1 to that option's tally
/// through MPC without revealing which options were chosen. The respondent
/// record pins the caller to at most one active response; withdrawing frees
/// them to respond again.
///
/// # Arguments
/// * `survey_id` - The survey ID (used for account derivation via Anchor's #[instruction] attribute)
/// * `selection` - Encrypted selection bitmask (bit i = option i chosen)
/// * `selection_encryption_pubkey` - Respondent's public key for encryption
/// * `selection_nonce` - Cryptographic nonce for the selection encryption
///
/// Note: The `unused_variables` warning for `survey_id` is spurious. The
/// parameter is used in the `SubmitResponse` struct's `#[account]` constraint
/// via `survey_id.to_le_bytes()` for PDA derivation, which the compiler
/// cannot see because Anchor's macros expand after static analysis.
#[allow(unused_variables)]
pub fn submit_response(
    ctx: Context<SubmitResponse>,
    computation_offset: u64,
    survey_id: u32,
    selection: [u8; 32],
    selection_encryption_pubkey: [u8; 32],
    selection_nonce: u128,
) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .survey_acc
        .accepts_responses_at(clock.unix_timestamp)?;

    require!(
        !ctx.accounts.respondent_record.has_responded,
        ErrorCode::AlreadyResponded
    );

    let survey_key = ctx.accounts.survey_acc.key();
    let record = &mut ctx.accounts.respondent_record;
    record.bump = ctx.bumps.respondent_record;
    record.survey = survey_key;
    record.respondent = ctx.accounts.payer.key();
    record.has_responded = true;
    record.selection_ciphertext = selection;
    record.selection_nonce = selection_nonce;
    record.encryption_pubkey = selection_encryption_pubkey;
    record.responded_at = clock.unix_timestamp;

    ctx.accounts.survey_acc.respondent_count += 1;

    let computation_args = ArgBuilder::new()
        .plaintext_u8(ctx.accounts.survey_acc.option_count)
        .x25519_pubkey(selection_encryption_pubkey)
        .plaintext_u128(selection_nonce)
        .encrypted_u8(selection)
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
        vec![SubmitResponseCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[CallbackAccount {
                pubkey: ctx.accounts.survey_acc.key(),
                is_writable: true,
            }],
        )?],
        1,
        0,
    )?;
    Ok(())
}

pub fn submit_response_callback(
    ctx: Context<SubmitResponseCallback>,
    output: SignedComputationOutputs<SubmitResponseOutput>,
) -> Result<()> {
    let tallies = match output.verify_output(
        &ctx.accounts.cluster_account,
        &ctx.accounts.computation_account,
    ) {
        Ok(SubmitResponseOutput { field_0 }) => field_0,
        Err(_) => return Err(ErrorCode::AbortedComputation.into()),
    };

    ctx.accounts.survey_acc.tally_state = tallies.ciphertexts;
    ctx.accounts.survey_acc.nonce = tallies.nonce;

    let clock = Clock::get()?;
    emit!(ResponseSubmittedEvent {
        survey_id: ctx.accounts.survey_acc.id,
        respondent_count: ctx.accounts.survey_acc.respondent_count,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
