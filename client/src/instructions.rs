//! Instruction builders for every program operation.
//!
//! Anchor instruction data is the 8-byte global sighash followed by the
//! borsh-encoded arguments; account orders mirror the program's Accounts
//! structs. The encrypted-path builders take ciphertexts produced by the
//! external Arcium encryption SDK and the protocol account addresses the
//! SDK resolves for the target cluster — this crate never encrypts.

use anchor_lang::AnchorSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use survey::state::ViewerRole;

/// Addresses of the Arcium protocol accounts a queued computation needs,
/// as resolved by the Arcium client tooling.
#[derive(Debug, Clone, Copy)]
pub struct ArciumQueueAccounts {
    pub sign_pda: Pubkey,
    pub mxe: Pubkey,
    pub mempool: Pubkey,
    pub executing_pool: Pubkey,
    pub computation: Pubkey,
    pub comp_def: Pubkey,
    pub cluster: Pubkey,
    pub fee_pool: Pubkey,
    pub clock: Pubkey,
    pub arcium_program: Pubkey,
}

/// A selection already encrypted by the external SDK.
#[derive(Debug, Clone, Copy)]
pub struct EncryptedSelection {
    pub ciphertext: [u8; 32],
    pub encryption_pubkey: [u8; 32],
    pub nonce: u128,
}

fn anchor_sighash(name: &str) -> [u8; 8] {
    let digest =
        anchor_lang::solana_program::hash::hash(format!("global:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest.to_bytes()[..8]);
    out
}

fn encode<T: AnchorSerialize>(name: &str, args: &T) -> Vec<u8> {
    let mut data = anchor_sighash(name).to_vec();
    args.serialize(&mut data).expect("instruction args encode");
    data
}

/// Metas shared by every computation-queueing instruction, in the order the
/// program's queue account structs declare them.
fn queue_metas(payer: Pubkey, arcium: &ArciumQueueAccounts) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(payer, true),
        AccountMeta::new(arcium.sign_pda, false),
        AccountMeta::new_readonly(arcium.mxe, false),
        AccountMeta::new(arcium.mempool, false),
        AccountMeta::new(arcium.executing_pool, false),
        AccountMeta::new(arcium.computation, false),
        AccountMeta::new_readonly(arcium.comp_def, false),
        AccountMeta::new(arcium.cluster, false),
        AccountMeta::new(arcium.fee_pool, false),
        AccountMeta::new_readonly(arcium.clock, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(arcium.arcium_program, false),
    ]
}

#[derive(AnchorSerialize)]
struct CreateSurveyArgs {
    computation_offset: u64,
    id: u32,
    title: String,
    description: String,
    options: Vec<String>,
    deadline: i64,
    nonce: u128,
}

#[allow(clippy::too_many_arguments)]
pub fn create_survey(
    program_id: Pubkey,
    payer: Pubkey,
    survey: Pubkey,
    arcium: &ArciumQueueAccounts,
    computation_offset: u64,
    id: u32,
    title: String,
    description: String,
    options: Vec<String>,
    deadline: i64,
    nonce: u128,
) -> Instruction {
    let mut accounts = queue_metas(payer, arcium);
    accounts.push(AccountMeta::new(survey, false));
    Instruction {
        program_id,
        accounts,
        data: encode(
            "create_survey",
            &CreateSurveyArgs {
                computation_offset,
                id,
                title,
                description,
                options,
                deadline,
                nonce,
            },
        ),
    }
}

#[derive(AnchorSerialize)]
struct SubmitResponseArgs {
    computation_offset: u64,
    survey_id: u32,
    selection: [u8; 32],
    selection_encryption_pubkey: [u8; 32],
    selection_nonce: u128,
}

#[allow(clippy::too_many_arguments)]
pub fn submit_response(
    program_id: Pubkey,
    payer: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    respondent_record: Pubkey,
    arcium: &ArciumQueueAccounts,
    computation_offset: u64,
    survey_id: u32,
    selection: &EncryptedSelection,
) -> Instruction {
    let mut accounts = queue_metas(payer, arcium);
    accounts.push(AccountMeta::new_readonly(authority, false));
    accounts.push(AccountMeta::new(survey, false));
    accounts.push(AccountMeta::new(respondent_record, false));
    Instruction {
        program_id,
        accounts,
        data: encode(
            "submit_response",
            &SubmitResponseArgs {
                computation_offset,
                survey_id,
                selection: selection.ciphertext,
                selection_encryption_pubkey: selection.encryption_pubkey,
                selection_nonce: selection.nonce,
            },
        ),
    }
}

#[derive(AnchorSerialize)]
struct WithdrawResponseArgs {
    survey_id: u32,
}

pub fn withdraw_response(
    program_id: Pubkey,
    payer: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    respondent_record: Pubkey,
    survey_id: u32,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(payer, true),
            AccountMeta::new_readonly(authority, false),
            AccountMeta::new(survey, false),
            AccountMeta::new(respondent_record, false),
        ],
        data: encode("withdraw_response", &WithdrawResponseArgs { survey_id }),
    }
}

#[derive(AnchorSerialize)]
struct AuthorizeViewerArgs {
    survey_id: u32,
    viewer: Pubkey,
    role: ViewerRole,
    expires_at: i64,
}

pub fn authorize_viewer(
    program_id: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    viewer_grant: Pubkey,
    survey_id: u32,
    viewer: Pubkey,
    role: ViewerRole,
    expires_at: i64,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(survey, false),
            AccountMeta::new(viewer_grant, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: encode(
            "authorize_viewer",
            &AuthorizeViewerArgs {
                survey_id,
                viewer,
                role,
                expires_at,
            },
        ),
    }
}

#[derive(AnchorSerialize)]
struct RevokeViewerArgs {
    survey_id: u32,
    viewer: Pubkey,
}

pub fn revoke_viewer(
    program_id: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    viewer_grant: Pubkey,
    survey_id: u32,
    viewer: Pubkey,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(survey, false),
            AccountMeta::new(viewer_grant, false),
        ],
        data: encode("revoke_viewer", &RevokeViewerArgs { survey_id, viewer }),
    }
}

#[derive(AnchorSerialize)]
struct SurveyIdArgs {
    survey_id: u32,
}

fn admin_only(
    program_id: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    name: &str,
    survey_id: u32,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(survey, false),
        ],
        data: encode(name, &SurveyIdArgs { survey_id }),
    }
}

pub fn close_survey(
    program_id: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    survey_id: u32,
) -> Instruction {
    admin_only(program_id, authority, survey, "close_survey", survey_id)
}

pub fn reopen_survey(
    program_id: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    survey_id: u32,
) -> Instruction {
    admin_only(program_id, authority, survey, "reopen_survey", survey_id)
}

#[derive(AnchorSerialize)]
struct ExtendDeadlineArgs {
    survey_id: u32,
    new_deadline: i64,
}

pub fn extend_deadline(
    program_id: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    survey_id: u32,
    new_deadline: i64,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new(survey, false),
        ],
        data: encode(
            "extend_deadline",
            &ExtendDeadlineArgs {
                survey_id,
                new_deadline,
            },
        ),
    }
}

#[derive(AnchorSerialize)]
struct ShareTalliesArgs {
    computation_offset: u64,
    survey_id: u32,
    viewer_encryption_pubkey: [u8; 32],
    viewer_nonce: u128,
}

/// `viewer_grant` is `None` when the authority itself requests the
/// tallies; Anchor's convention for an omitted optional account is to pass
/// the program id in its place.
#[allow(clippy::too_many_arguments)]
pub fn share_tallies(
    program_id: Pubkey,
    payer: Pubkey,
    authority: Pubkey,
    survey: Pubkey,
    viewer_grant: Option<Pubkey>,
    arcium: &ArciumQueueAccounts,
    computation_offset: u64,
    survey_id: u32,
    viewer_encryption_pubkey: [u8; 32],
    viewer_nonce: u128,
) -> Instruction {
    let mut accounts = queue_metas(payer, arcium);
    accounts.push(AccountMeta::new_readonly(authority, false));
    accounts.push(AccountMeta::new_readonly(survey, false));
    accounts.push(AccountMeta::new_readonly(
        viewer_grant.unwrap_or(program_id),
        false,
    ));
    Instruction {
        program_id,
        accounts,
        data: encode(
            "share_tallies",
            &ShareTalliesArgs {
                computation_offset,
                survey_id,
                viewer_encryption_pubkey,
                viewer_nonce,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arcium_accounts() -> ArciumQueueAccounts {
        ArciumQueueAccounts {
            sign_pda: Pubkey::new_unique(),
            mxe: Pubkey::new_unique(),
            mempool: Pubkey::new_unique(),
            executing_pool: Pubkey::new_unique(),
            computation: Pubkey::new_unique(),
            comp_def: Pubkey::new_unique(),
            cluster: Pubkey::new_unique(),
            fee_pool: Pubkey::new_unique(),
            clock: Pubkey::new_unique(),
            arcium_program: Pubkey::new_unique(),
        }
    }

    #[test]
    fn sighashes_are_distinct_per_instruction() {
        let names = [
            "create_survey",
            "submit_response",
            "withdraw_response",
            "authorize_viewer",
            "revoke_viewer",
            "close_survey",
            "reopen_survey",
            "extend_deadline",
            "share_tallies",
        ];
        for a in &names {
            for b in &names {
                if a != b {
                    assert_ne!(anchor_sighash(a), anchor_sighash(b));
                }
            }
        }
    }

    #[test]
    fn close_and_reopen_share_accounts_but_not_data() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let survey = Pubkey::new_unique();

        let close = close_survey(program_id, authority, survey, 3);
        let reopen = reopen_survey(program_id, authority, survey, 3);

        assert_eq!(close.accounts.len(), 2);
        assert!(close.accounts[0].is_signer);
        assert!(close.accounts[1].is_writable);
        assert_eq!(close.accounts.len(), reopen.accounts.len());
        assert_ne!(close.data[..8], reopen.data[..8]);
        // same borsh-encoded args after the sighash
        assert_eq!(close.data[8..], reopen.data[8..]);
    }

    #[test]
    fn submit_response_orders_queue_accounts_first() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let survey = Pubkey::new_unique();
        let record = Pubkey::new_unique();
        let arcium = arcium_accounts();

        let selection = EncryptedSelection {
            ciphertext: [1; 32],
            encryption_pubkey: [2; 32],
            nonce: 7,
        };
        let ix = submit_response(
            program_id, payer, authority, survey, record, &arcium, 99, 5, &selection,
        );

        // 12 queue metas + authority + survey + respondent record
        assert_eq!(ix.accounts.len(), 15);
        assert_eq!(ix.accounts[0].pubkey, payer);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[12].pubkey, authority);
        assert!(!ix.accounts[12].is_writable);
        assert!(ix.accounts[13].is_writable);
        assert!(ix.accounts[14].is_writable);
        // sighash + u64 + u32 + 32 + 32 + u128
        assert_eq!(ix.data.len(), 8 + 8 + 4 + 32 + 32 + 16);
    }

    #[test]
    fn share_tallies_substitutes_program_id_for_missing_grant() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let authority = payer;
        let survey = Pubkey::new_unique();
        let arcium = arcium_accounts();

        let ix = share_tallies(
            program_id, payer, authority, survey, None, &arcium, 1, 2, [0; 32], 0,
        );
        assert_eq!(ix.accounts.last().unwrap().pubkey, program_id);

        let grant = Pubkey::new_unique();
        let ix = share_tallies(
            program_id,
            payer,
            authority,
            survey,
            Some(grant),
            &arcium,
            1,
            2,
            [0; 32],
            0,
        );
        assert_eq!(ix.accounts.last().unwrap().pubkey, grant);
    }

    #[test]
    fn authorize_viewer_encodes_role_and_expiry() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let survey = Pubkey::new_unique();
        let grant = Pubkey::new_unique();
        let viewer = Pubkey::new_unique();

        let ix = authorize_viewer(
            program_id,
            authority,
            survey,
            grant,
            1,
            viewer,
            ViewerRole::Auditor,
            12_345,
        );
        // sighash + u32 + pubkey + role byte + i64
        assert_eq!(ix.data.len(), 8 + 4 + 32 + 1 + 8);
        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(
            ix.accounts.last().unwrap().pubkey,
            system_program::id()
        );
    }
}
