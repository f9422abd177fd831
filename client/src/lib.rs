//! Off-chain orchestration for the confidential survey program.
//!
//! This crate is deliberately thin: it mirrors on-chain state into
//! UI-observable views, runs the same guard checks the program enforces so
//! a frontend can disable doomed actions up front, builds instructions, and
//! submits them over RPC. Encryption and decryption of selections and
//! tallies are delegated entirely to the external Arcium SDK; this crate
//! only moves the resulting ciphertexts around.

pub mod error;
pub mod instructions;
pub mod pda;
pub mod view;

pub use error::ClientError;
pub use instructions::{ArciumQueueAccounts, EncryptedSelection};
pub use view::{selection_mask, ResponseStatus, SurveyView, ViewerStatus};

use std::time::{SystemTime, UNIX_EPOCH};

use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use survey::state::ViewerRole;

pub struct SurveyClient {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl SurveyClient {
    pub fn new(rpc_url: &str, program_id: Pubkey) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            program_id,
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn unix_now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }

    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ClientError> {
        let account = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())?
            .value;
        Ok(account.map(|account| account.data))
    }

    // ---- state mirroring ------------------------------------------------

    pub fn fetch_survey(
        &self,
        authority: &Pubkey,
        survey_id: u32,
    ) -> Result<SurveyView, ClientError> {
        let (address, _) = pda::survey_pda(&self.program_id, authority, survey_id);
        let data = self
            .fetch_account(&address)?
            .ok_or(ClientError::AccountNotFound(address))?;
        SurveyView::from_account_data(&data)
    }

    /// `None` means the wallet has never responded to this survey.
    pub fn fetch_response_status(
        &self,
        survey: &Pubkey,
        wallet: &Pubkey,
    ) -> Result<Option<ResponseStatus>, ClientError> {
        let (address, _) = pda::respondent_pda(&self.program_id, survey, wallet);
        match self.fetch_account(&address)? {
            Some(data) => Ok(Some(ResponseStatus::from_account_data(&data)?)),
            None => Ok(None),
        }
    }

    /// `None` means the wallet holds no grant for this survey.
    pub fn fetch_viewer_status(
        &self,
        survey: &Pubkey,
        wallet: &Pubkey,
    ) -> Result<Option<ViewerStatus>, ClientError> {
        let (address, _) = pda::viewer_pda(&self.program_id, survey, wallet);
        match self.fetch_account(&address)? {
            Some(data) => Ok(Some(ViewerStatus::from_account_data(&data)?)),
            None => Ok(None),
        }
    }

    // ---- transaction submission -----------------------------------------

    pub fn send(
        &self,
        payer: &Keypair,
        instructions: &[Instruction],
    ) -> Result<Signature, ClientError> {
        let blockhash = self.rpc.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        Ok(self.rpc.send_and_confirm_transaction(&transaction)?)
    }

    // ---- mutations, each followed by a state refetch ---------------------

    /// Submits a pre-encrypted selection. Pre-flight checks mirror the
    /// program's guards so a UI can surface the failure without paying for
    /// a doomed transaction.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_response(
        &self,
        responder: &Keypair,
        authority: &Pubkey,
        survey_id: u32,
        arcium: &ArciumQueueAccounts,
        computation_offset: u64,
        selection: &EncryptedSelection,
    ) -> Result<SurveyView, ClientError> {
        let survey_view = self.fetch_survey(authority, survey_id)?;
        survey_view.ensure_accepts_responses(Self::unix_now())?;

        let (survey, _) = pda::survey_pda(&self.program_id, authority, survey_id);
        let responder_key = responder.pubkey();
        if let Some(status) = self.fetch_response_status(&survey, &responder_key)? {
            status.ensure_can_submit()?;
        }

        let (record, _) = pda::respondent_pda(&self.program_id, &survey, &responder_key);
        let ix = instructions::submit_response(
            self.program_id,
            responder_key,
            *authority,
            survey,
            record,
            arcium,
            computation_offset,
            survey_id,
            selection,
        );
        self.send(responder, &[ix])?;
        self.fetch_survey(authority, survey_id)
    }

    pub fn withdraw_response(
        &self,
        responder: &Keypair,
        authority: &Pubkey,
        survey_id: u32,
    ) -> Result<SurveyView, ClientError> {
        let (survey, _) = pda::survey_pda(&self.program_id, authority, survey_id);
        let responder_key = responder.pubkey();
        let status = self
            .fetch_response_status(&survey, &responder_key)?
            .ok_or(ClientError::NoActiveResponse)?;
        status.ensure_can_withdraw()?;

        let (record, _) = pda::respondent_pda(&self.program_id, &survey, &responder_key);
        let ix = instructions::withdraw_response(
            self.program_id,
            responder_key,
            *authority,
            survey,
            record,
            survey_id,
        );
        self.send(responder, &[ix])?;
        self.fetch_survey(authority, survey_id)
    }

    pub fn authorize_viewer(
        &self,
        authority: &Keypair,
        survey_id: u32,
        viewer: Pubkey,
        role: ViewerRole,
        expires_at: i64,
    ) -> Result<SurveyView, ClientError> {
        let authority_key = authority.pubkey();
        let (survey, _) = pda::survey_pda(&self.program_id, &authority_key, survey_id);
        let (grant, _) = pda::viewer_pda(&self.program_id, &survey, &viewer);
        let ix = instructions::authorize_viewer(
            self.program_id,
            authority_key,
            survey,
            grant,
            survey_id,
            viewer,
            role,
            expires_at,
        );
        self.send(authority, &[ix])?;
        self.fetch_survey(&authority_key, survey_id)
    }

    pub fn revoke_viewer(
        &self,
        authority: &Keypair,
        survey_id: u32,
        viewer: Pubkey,
    ) -> Result<SurveyView, ClientError> {
        let authority_key = authority.pubkey();
        let (survey, _) = pda::survey_pda(&self.program_id, &authority_key, survey_id);
        let (grant, _) = pda::viewer_pda(&self.program_id, &survey, &viewer);
        let ix = instructions::revoke_viewer(
            self.program_id,
            authority_key,
            survey,
            grant,
            survey_id,
            viewer,
        );
        self.send(authority, &[ix])?;
        self.fetch_survey(&authority_key, survey_id)
    }

    pub fn close_survey(
        &self,
        authority: &Keypair,
        survey_id: u32,
    ) -> Result<SurveyView, ClientError> {
        let authority_key = authority.pubkey();
        let (survey, _) = pda::survey_pda(&self.program_id, &authority_key, survey_id);
        let ix =
            instructions::close_survey(self.program_id, authority_key, survey, survey_id);
        self.send(authority, &[ix])?;
        self.fetch_survey(&authority_key, survey_id)
    }

    pub fn reopen_survey(
        &self,
        authority: &Keypair,
        survey_id: u32,
    ) -> Result<SurveyView, ClientError> {
        let authority_key = authority.pubkey();
        let (survey, _) = pda::survey_pda(&self.program_id, &authority_key, survey_id);
        let ix =
            instructions::reopen_survey(self.program_id, authority_key, survey, survey_id);
        self.send(authority, &[ix])?;
        self.fetch_survey(&authority_key, survey_id)
    }

    pub fn extend_deadline(
        &self,
        authority: &Keypair,
        survey_id: u32,
        new_deadline: i64,
    ) -> Result<SurveyView, ClientError> {
        let authority_key = authority.pubkey();
        let (survey, _) = pda::survey_pda(&self.program_id, &authority_key, survey_id);
        let ix = instructions::extend_deadline(
            self.program_id,
            authority_key,
            survey,
            survey_id,
            new_deadline,
        );
        self.send(authority, &[ix])?;
        self.fetch_survey(&authority_key, survey_id)
    }

    /// Queues the MPC computation that re-encrypts the tallies to the
    /// caller's key. The re-encrypted counters arrive in a
    /// `TalliesSharedEvent`; decrypting them is the external SDK's job.
    #[allow(clippy::too_many_arguments)]
    pub fn request_tallies(
        &self,
        viewer: &Keypair,
        authority: &Pubkey,
        survey_id: u32,
        arcium: &ArciumQueueAccounts,
        computation_offset: u64,
        viewer_encryption_pubkey: [u8; 32],
        viewer_nonce: u128,
    ) -> Result<Signature, ClientError> {
        let (survey, _) = pda::survey_pda(&self.program_id, authority, survey_id);
        let viewer_key = viewer.pubkey();

        // The authority is always authorized; everyone else must hold an
        // unexpired grant.
        let grant = if viewer_key == *authority {
            None
        } else {
            let status = self
                .fetch_viewer_status(&survey, &viewer_key)?
                .ok_or(ClientError::NotAuthorized)?;
            status.ensure_valid_at(Self::unix_now())?;
            Some(pda::viewer_pda(&self.program_id, &survey, &viewer_key).0)
        };

        let ix = instructions::share_tallies(
            self.program_id,
            viewer_key,
            *authority,
            survey,
            grant,
            arcium,
            computation_offset,
            survey_id,
            viewer_encryption_pubkey,
            viewer_nonce,
        );
        self.send(viewer, &[ix])
    }
}
