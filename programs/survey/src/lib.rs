// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]
// Fix warning: use of deprecated method `anchor_lang::prelude::AccountInfo::<'a>::realloc`: Use AccountInfo::resize() instead
// See https://solana.stackexchange.com/questions/22979
#![allow(deprecated)]

use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

pub mod constants;
pub mod error;
pub mod handlers;
pub mod state;

use constants::*;
pub use error::ErrorCode;
use state::*;

declare_id!("AxSBt1XGLESzNn3x1ConcFw2soSMYnPiTYNgZDxgfXxP");

#[arcium_program]
pub mod survey {
    use super::*;

    pub fn init_survey_tallies_comp_def(ctx: Context<InitSurveyTalliesCompDef>) -> Result<()> {
        handlers::create_survey::init_survey_tallies_comp_def(ctx)
    }

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
        handlers::create_survey::create_survey(
            ctx,
            computation_offset,
            id,
            title,
            description,
            options,
            deadline,
            nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "init_survey_tallies")]
    pub fn init_survey_tallies_callback(
        ctx: Context<InitSurveyTalliesCallback>,
        output: SignedComputationOutputs<InitSurveyTalliesOutput>,
    ) -> Result<()> {
        handlers::create_survey::init_survey_tallies_callback(ctx, output)
    }

    pub fn init_submit_response_comp_def(ctx: Context<InitSubmitResponseCompDef>) -> Result<()> {
        handlers::submit_response::init_submit_response_comp_def(ctx)
    }

    #[allow(unused_variables)]
    pub fn submit_response(
        ctx: Context<SubmitResponse>,
        computation_offset: u64,
        survey_id: u32,
        selection: [u8; 32],
        selection_encryption_pubkey: [u8; 32],
        selection_nonce: u128,
    ) -> Result<()> {
        handlers::submit_response::submit_response(
            ctx,
            computation_offset,
            survey_id,
            selection,
            selection_encryption_pubkey,
            selection_nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "submit_response")]
    pub fn submit_response_callback(
        ctx: Context<SubmitResponseCallback>,
        output: SignedComputationOutputs<SubmitResponseOutput>,
    ) -> Result<()> {
        handlers::submit_response::submit_response_callback(ctx, output)
    }

    pub fn withdraw_response(ctx: Context<WithdrawResponse>, survey_id: u32) -> Result<()> {
        handlers::withdraw_response::withdraw_response(ctx, survey_id)
    }

    pub fn authorize_viewer(
        ctx: Context<AuthorizeViewer>,
        survey_id: u32,
        viewer: Pubkey,
        role: ViewerRole,
        expires_at: i64,
    ) -> Result<()> {
        handlers::viewers::authorize_viewer(ctx, survey_id, viewer, role, expires_at)
    }

    pub fn revoke_viewer(
        ctx: Context<RevokeViewer>,
        survey_id: u32,
        viewer: Pubkey,
    ) -> Result<()> {
        handlers::viewers::revoke_viewer(ctx, survey_id, viewer)
    }

    pub fn close_survey(ctx: Context<CloseSurvey>, survey_id: u32) -> Result<()> {
        handlers::lifecycle::close_survey(ctx, survey_id)
    }

    pub fn reopen_survey(ctx: Context<ReopenSurvey>, survey_id: u32) -> Result<()> {
        handlers::lifecycle::reopen_survey(ctx, survey_id)
    }

    pub fn extend_deadline(
        ctx: Context<ExtendDeadline>,
        survey_id: u32,
        new_deadline: i64,
    ) -> Result<()> {
        handlers::lifecycle::extend_deadline(ctx, survey_id, new_deadline)
    }

    pub fn init_share_tallies_comp_def(ctx: Context<InitShareTalliesCompDef>) -> Result<()> {
        handlers::share_tallies::init_share_tallies_comp_def(ctx)
    }

    #[allow(unused_variables)]
    pub fn share_tallies(
        ctx: Context<ShareTallies>,
        computation_offset: u64,
        survey_id: u32,
        viewer_encryption_pubkey: [u8; 32],
        viewer_nonce: u128,
    ) -> Result<()> {
        handlers::share_tallies::share_tallies(
            ctx,
            computation_offset,
            survey_id,
            viewer_encryption_pubkey,
            viewer_nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "share_tallies")]
    pub fn share_tallies_callback(
        ctx: Context<ShareTalliesCallback>,
        output: SignedComputationOutputs<ShareTalliesOutput>,
    ) -> Result<()> {
        handlers::share_tallies::share_tallies_callback(ctx, output)
    }

    // Account struct definitions - these need to be inside the arcium_program module
    // so they can access the generated SignerAccount type

    #[init_computation_definition_accounts("init_survey_tallies", payer)]
    #[derive(Accounts)]
    pub struct InitSurveyTalliesCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("init_survey_tallies", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, id: u32)]
    pub struct CreateSurvey<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_INIT_SURVEY_TALLIES)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            init,
            payer = payer,
            space = 8 + Survey::INIT_SPACE,
            seeds = [b"survey", payer.key().as_ref(), id.to_le_bytes().as_ref()],
            bump,
        )]
        pub survey_acc: Account<'info, Survey>,
    }

    #[callback_accounts("init_survey_tallies")]
    #[derive(Accounts)]
    pub struct InitSurveyTalliesCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_INIT_SURVEY_TALLIES)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        /// CHECK: computation_account, checked by the arcium program
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        /// CHECK: survey_acc, checked by the callback account key passed in queue_computation
        #[account(mut)]
        pub survey_acc: Account<'info, Survey>,
    }

    #[init_computation_definition_accounts("submit_response", payer)]
    #[derive(Accounts)]
    pub struct InitSubmitResponseCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("submit_response", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, survey_id: u32)]
    pub struct SubmitResponse<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SUBMIT_RESPONSE)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        /// CHECK: Survey authority pubkey
        #[account(
            address = survey_acc.authority,
        )]
        pub authority: UncheckedAccount<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,

        #[account(
            init_if_needed,
            payer = payer,
            space = 8 + RespondentRecord::INIT_SPACE,
            seeds = [b"respondent", survey_acc.key().as_ref(), payer.key().as_ref()],
            bump,
        )]
        pub respondent_record: Account<'info, RespondentRecord>,
    }

    #[callback_accounts("submit_response")]
    #[derive(Accounts)]
    pub struct SubmitResponseCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SUBMIT_RESPONSE)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        /// CHECK: computation_account, checked by the arcium program
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        #[account(mut)]
        pub survey_acc: Account<'info, Survey>,
    }

    #[derive(Accounts)]
    #[instruction(survey_id: u32)]
    pub struct WithdrawResponse<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        /// CHECK: Survey authority pubkey
        #[account(
            address = survey_acc.authority,
        )]
        pub authority: UncheckedAccount<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,

        #[account(
            mut,
            seeds = [b"respondent", survey_acc.key().as_ref(), payer.key().as_ref()],
            bump = respondent_record.bump,
        )]
        pub respondent_record: Account<'info, RespondentRecord>,
    }

    #[derive(Accounts)]
    #[instruction(survey_id: u32, viewer: Pubkey)]
    pub struct AuthorizeViewer<'info> {
        #[account(mut)]
        pub authority: Signer<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,

        #[account(
            init_if_needed,
            payer = authority,
            space = 8 + ViewerGrant::INIT_SPACE,
            seeds = [b"viewer", survey_acc.key().as_ref(), viewer.as_ref()],
            bump,
        )]
        pub viewer_grant: Account<'info, ViewerGrant>,

        pub system_program: Program<'info, System>,
    }

    #[derive(Accounts)]
    #[instruction(survey_id: u32, viewer: Pubkey)]
    pub struct RevokeViewer<'info> {
        #[account(mut)]
        pub authority: Signer<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,

        #[account(
            mut,
            close = authority,
            seeds = [b"viewer", survey_acc.key().as_ref(), viewer.as_ref()],
            bump = viewer_grant.bump,
        )]
        pub viewer_grant: Account<'info, ViewerGrant>,
    }

    #[derive(Accounts)]
    #[instruction(survey_id: u32)]
    pub struct CloseSurvey<'info> {
        #[account(mut)]
        pub authority: Signer<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,
    }

    #[derive(Accounts)]
    #[instruction(survey_id: u32)]
    pub struct ReopenSurvey<'info> {
        #[account(mut)]
        pub authority: Signer<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,
    }

    #[derive(Accounts)]
    #[instruction(survey_id: u32)]
    pub struct ExtendDeadline<'info> {
        #[account(mut)]
        pub authority: Signer<'info>,

        #[account(
            mut,
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,
    }

    #[init_computation_definition_accounts("share_tallies", payer)]
    #[derive(Accounts)]
    pub struct InitShareTalliesCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("share_tallies", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64, survey_id: u32)]
    pub struct ShareTallies<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SHARE_TALLIES)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        /// CHECK: Survey authority pubkey
        #[account(
            address = survey_acc.authority,
        )]
        pub authority: UncheckedAccount<'info>,

        #[account(
            seeds = [b"survey", authority.key().as_ref(), survey_id.to_le_bytes().as_ref()],
            bump = survey_acc.bump,
            has_one = authority
        )]
        pub survey_acc: Account<'info, Survey>,

        /// The caller's grant; not required when the authority itself asks
        /// for the tallies. Validated in the handler.
        pub viewer_grant: Option<Account<'info, ViewerGrant>>,
    }

    #[callback_accounts("share_tallies")]
    #[derive(Accounts)]
    pub struct ShareTalliesCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SHARE_TALLIES)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        /// CHECK: computation_account, checked by the arcium program
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        pub survey_acc: Account<'info, Survey>,
    }
}

pub use survey::{
    AuthorizeViewer, CloseSurvey, CreateSurvey, ExtendDeadline, InitShareTalliesCompDef,
    InitSubmitResponseCompDef, InitSurveyTalliesCallback, InitSurveyTalliesCompDef,
    InitSurveyTalliesOutput, ReopenSurvey, RevokeViewer, ShareTallies, ShareTalliesCallback,
    ShareTalliesOutput, SubmitResponse, SubmitResponseCallback, SubmitResponseOutput,
    WithdrawResponse,
};
