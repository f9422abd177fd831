use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    constants::{MAX_OPTIONS, MAX_OPTION_LABEL_LEN, MIN_OPTIONS},
    error::ErrorCode,
    state::SurveyCreatedEvent,
    survey::{
        CreateSurvey, InitSurveyTalliesCallback, InitSurveyTalliesCompDef,
        InitSurveyTalliesOutput,
    },
};

/// One-off job to create computation definition for `init_survey_tallies` in
/// encrypted-ixs/src/lib.rs.
///
/// This initializes the onchain computation definition account that registers
/// the encrypted instruction. Must be called once before creating surveys.
pub fn init_survey_tallies_comp_def(ctx: Context<InitSurveyTalliesCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, None, None)?;
    Ok(())
}

/// Creates a new survey and queues the MPC computation that initializes its
/// encrypted per-option tallies to zero.
///
/// The tallies are stored as opaque ciphertexts from the moment the survey
/// exists: even "all zeros" is indistinguishable from a survey with
/// responses. Responses are accepted until the survey is closed or the
/// deadline passes.
///
/// # Arguments
/// * `id` - Unique identifier for this survey (scoped to the creator)
/// * `title`, `description` - Display metadata
/// * `options` - Ordered option labels (2 to 8 entries)
/// * `deadline` - Unix timestamp after which responses are rejected
/// * `nonce` - Cryptographic nonce for initializing the encrypted tallies
pub fn create_survey(
    ctx: Context<CreateSurvey>,
    computation_offset: u64,
    id: u32,
    title: String,
    description: String,
    options: Vec<String>,
    deadline: i64,
    nonce: u128,
) -> Result<()> {
    require!(options.len() >= MIN_OPTIONS, ErrorCode::TooFewOptions);
    require!(options.len() <= MAX_OPTIONS, ErrorCode::TooManyOptions);
    require!(
        options.iter().all(|label| label.len() <= MAX_OPTION_LABEL_LEN),
        ErrorCode::OptionLabelTooLong
    );

    let clock = Clock::get()?;
    require!(deadline > clock.unix_timestamp, ErrorCode::InvalidDeadline);

    msg!("Creating survey with id {}", id);

    let survey = &mut ctx.accounts.survey_acc;
    survey.bump = ctx.bumps.survey_acc;
    survey.tally_state = [[0; 32]; 8];
    survey.id = id;
    survey.authority = ctx.accounts.payer.key();
    survey.nonce = nonce;
    survey.title = title;
    survey.description = description;
    survey.option_count = options.len() as u8;
    survey.options = options;
    survey.is_active = true;
    survey.deadline = deadline;
    survey.respondent_count = 0;
    survey.viewer_count = 0;

    emit!(SurveyCreatedEvent {
        survey_id: id,
        authority: ctx.accounts.payer.key(),
        option_count: ctx.accounts.survey_acc.option_count,
        deadline,
    });

    let computation_args = ArgBuilder::new().plaintext_u128(nonce).build();

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    // Initialize the encrypted tally counters through MPC
    queue_computation(
        ctx.accounts,
        computation_offset,
        computation_args,
        None,
        vec![InitSurveyTalliesCallback::callback_ix(
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

pub fn init_survey_tallies_callback(
    ctx: Context<InitSurveyTalliesCallback>,
    output: SignedComputationOutputs<InitSurveyTalliesOutput>,
) -> Result<()> {
    let tallies = match output.verify_output(
        &ctx.accounts.cluster_account,
        &ctx.accounts.computation_account,
    ) {
        Ok(InitSurveyTalliesOutput { field_0 }) => field_0,
        Err(_) => return Err(ErrorCode::AbortedComputation.into()),
    };

    ctx.accounts.survey_acc.tally_state = tallies.ciphertexts;
    ctx.accounts.survey_acc.nonce = tallies.nonce;

    Ok(())
}
