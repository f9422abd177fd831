use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// A survey whose per-option tallies are aggregated homomorphically and
/// stored as opaque ciphertexts. Anyone can read the ciphertexts; only the
/// authority and granted viewers can have them re-encrypted to their key.
#[account]
#[derive(InitSpace)]
pub struct Survey {
    /// PDA bump seed
    pub bump: u8,
    /// Encrypted per-option tallies as 32-byte ciphertexts. Kept directly
    /// after the bump so MPC account references can use a fixed offset.
    pub tally_state: [[u8; 32]; 8],
    /// Unique identifier for this survey, scoped to the authority
    pub id: u32,
    /// The survey admin: closes, reopens, extends, manages viewers, and is
    /// always allowed to decrypt tallies
    pub authority: Pubkey,
    /// Cryptographic nonce for the encrypted tally state
    pub nonce: u128,
    #[max_len(64)]
    pub title: String,
    #[max_len(256)]
    pub description: String,
    /// Ordered option labels (max 8 options, 32 chars each)
    #[max_len(8, 32)]
    pub options: Vec<String>,
    /// Number of options actually in use
    pub option_count: u8,
    /// Whether responses are currently accepted
    pub is_active: bool,
    /// Unix timestamp after which responses are rejected
    pub deadline: i64,
    /// Number of currently active responses
    pub respondent_count: u32,
    /// Number of currently granted viewers
    pub viewer_count: u32,
}

impl Survey {
    /// Whether a response submitted at `now` would be accepted.
    pub fn accepts_responses_at(&self, now: i64) -> Result<()> {
        require!(self.is_active, ErrorCode::SurveyInactive);
        require!(now < self.deadline, ErrorCode::DeadlinePassed);
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        require!(self.is_active, ErrorCode::SurveyInactive);
        self.is_active = false;
        Ok(())
    }

    /// Reopening does not touch the deadline; a survey whose deadline has
    /// passed also needs `extend_deadline` before it accepts responses.
    pub fn reopen(&mut self) -> Result<()> {
        require!(!self.is_active, ErrorCode::SurveyAlreadyActive);
        self.is_active = true;
        Ok(())
    }

    pub fn extend_deadline(&mut self, new_deadline: i64) -> Result<()> {
        require!(new_deadline > self.deadline, ErrorCode::DeadlineNotExtended);
        self.deadline = new_deadline;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_survey() -> Survey {
        Survey {
            bump: 254,
            tally_state: [[7; 32]; 8],
            id: 3,
            authority: Pubkey::new_unique(),
            nonce: 42,
            title: "Team lunch".to_string(),
            description: "Pick every cuisine you would eat".to_string(),
            options: vec!["Sushi".to_string(), "Tacos".to_string()],
            option_count: 2,
            is_active: true,
            deadline: 1_000,
            respondent_count: 0,
            viewer_count: 0,
        }
    }

    #[test]
    fn tally_state_sits_at_fixed_offset() {
        // MPC computations reference the tally bytes by raw offset:
        // discriminator + 1 byte (bump). The field order must not drift.
        let survey = sample_survey();
        let mut data = Vec::new();
        survey.serialize(&mut data).unwrap();
        // serialized body starts after the bump byte
        assert_eq!(data[0], 254);
        assert_eq!(&data[1..1 + 32 * 8], &[7u8; 32 * 8][..]);
    }

    #[test]
    fn init_space_covers_max_len_fields() {
        let survey = Survey {
            title: "t".repeat(64),
            description: "d".repeat(256),
            options: vec!["o".repeat(32); 8],
            option_count: 8,
            ..sample_survey()
        };
        let mut data = Vec::new();
        survey.serialize(&mut data).unwrap();
        assert!(data.len() <= Survey::INIT_SPACE);
    }

    #[test]
    fn closed_survey_rejects_responses() {
        let mut survey = sample_survey();
        survey.close().unwrap();
        assert_eq!(
            survey.accepts_responses_at(0).unwrap_err(),
            ErrorCode::SurveyInactive.into()
        );
    }

    #[test]
    fn deadline_is_exclusive() {
        let survey = sample_survey();
        assert!(survey.accepts_responses_at(999).is_ok());
        assert_eq!(
            survey.accepts_responses_at(1_000).unwrap_err(),
            ErrorCode::DeadlinePassed.into()
        );
    }

    #[test]
    fn close_and_reopen_toggle_the_active_flag() {
        let mut survey = sample_survey();
        survey.close().unwrap();
        assert!(!survey.is_active);
        // double close is rejected
        assert_eq!(survey.close().unwrap_err(), ErrorCode::SurveyInactive.into());
        survey.reopen().unwrap();
        assert!(survey.is_active);
        assert_eq!(
            survey.reopen().unwrap_err(),
            ErrorCode::SurveyAlreadyActive.into()
        );
    }

    #[test]
    fn deadline_can_only_move_forward() {
        let mut survey = sample_survey();
        assert_eq!(
            survey.extend_deadline(1_000).unwrap_err(),
            ErrorCode::DeadlineNotExtended.into()
        );
        survey.extend_deadline(2_000).unwrap();
        assert_eq!(survey.deadline, 2_000);
    }
}
