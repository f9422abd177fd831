use anchor_lang::prelude::*;

use super::viewer::ViewerRole;

#[event]
pub struct SurveyCreatedEvent {
    pub survey_id: u32,
    pub authority: Pubkey,
    pub option_count: u8,
    pub deadline: i64,
}

#[event]
pub struct ResponseSubmittedEvent {
    pub survey_id: u32,
    /// Number of currently active responses, after this one
    pub respondent_count: u32,
    pub timestamp: i64,
}

#[event]
pub struct ResponseWithdrawnEvent {
    pub survey_id: u32,
    pub timestamp: i64,
}

#[event]
pub struct ViewerAuthorizedEvent {
    pub survey_id: u32,
    pub viewer: Pubkey,
    pub role: ViewerRole,
    pub expires_at: i64,
}

#[event]
pub struct ViewerRevokedEvent {
    pub survey_id: u32,
    pub viewer: Pubkey,
}

#[event]
pub struct SurveyClosedEvent {
    pub survey_id: u32,
    pub timestamp: i64,
}

#[event]
pub struct SurveyReopenedEvent {
    pub survey_id: u32,
    pub timestamp: i64,
}

#[event]
pub struct DeadlineExtendedEvent {
    pub survey_id: u32,
    pub new_deadline: i64,
}

/// Emitted when the MPC cluster has re-encrypted the tallies to a viewer's
/// key. The viewer decrypts `tallies` client-side with the matching secret.
#[event]
pub struct TalliesSharedEvent {
    pub survey_id: u32,
    pub encryption_key: [u8; 32],
    pub nonce: u128,
    pub tallies: [[u8; 32]; 8],
}
