//! Read-side mirrors of on-chain state, shaped for UI consumption, plus the
//! pre-flight guards a frontend uses to disable doomed actions instead of
//! submitting transactions that would revert.

use anchor_lang::AccountDeserialize;
use solana_sdk::pubkey::Pubkey;
use survey::state::{RespondentRecord, Survey, ViewerGrant, ViewerRole};

use crate::error::ClientError;

/// UI-observable snapshot of a survey. The tally handles are opaque
/// ciphertexts; decrypting them goes through `share_tallies` and the
/// external encryption SDK.
#[derive(Debug, Clone)]
pub struct SurveyView {
    pub id: u32,
    pub authority: Pubkey,
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub option_count: u8,
    pub is_active: bool,
    pub deadline: i64,
    pub respondent_count: u32,
    pub viewer_count: u32,
    pub tally_handles: [[u8; 32]; 8],
    pub nonce: u128,
}

impl SurveyView {
    pub fn from_account_data(data: &[u8]) -> Result<Self, ClientError> {
        let survey = Survey::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Deserialize(e.to_string()))?;
        Ok(survey.into())
    }

    /// Mirror of the program's submission guard.
    pub fn ensure_accepts_responses(&self, now: i64) -> Result<(), ClientError> {
        if !self.is_active {
            return Err(ClientError::SurveyClosed);
        }
        if now >= self.deadline {
            return Err(ClientError::DeadlinePassed);
        }
        Ok(())
    }
}

impl From<Survey> for SurveyView {
    fn from(survey: Survey) -> Self {
        Self {
            id: survey.id,
            authority: survey.authority,
            title: survey.title,
            description: survey.description,
            options: survey.options,
            option_count: survey.option_count,
            is_active: survey.is_active,
            deadline: survey.deadline,
            respondent_count: survey.respondent_count,
            viewer_count: survey.viewer_count,
            tally_handles: survey.tally_state,
            nonce: survey.nonce,
        }
    }
}

/// Packs chosen option indices into the bitmask the encrypted circuit
/// expects. One response may select several options.
pub fn selection_mask(indices: &[u8], option_count: u8) -> Result<u8, ClientError> {
    if indices.is_empty() {
        return Err(ClientError::EmptySelection);
    }
    let mut mask = 0u8;
    for &index in indices {
        if index >= option_count {
            return Err(ClientError::InvalidOption(index));
        }
        mask |= 1 << index;
    }
    Ok(mask)
}

/// Per-wallet response status mirrored from the respondent record.
#[derive(Debug, Clone, Copy)]
pub struct ResponseStatus {
    pub has_responded: bool,
    pub responded_at: i64,
}

impl ResponseStatus {
    pub fn from_account_data(data: &[u8]) -> Result<Self, ClientError> {
        let record = RespondentRecord::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Deserialize(e.to_string()))?;
        Ok(Self {
            has_responded: record.has_responded,
            responded_at: record.responded_at,
        })
    }

    pub fn ensure_can_submit(&self) -> Result<(), ClientError> {
        if self.has_responded {
            return Err(ClientError::AlreadyResponded);
        }
        Ok(())
    }

    pub fn ensure_can_withdraw(&self) -> Result<(), ClientError> {
        if !self.has_responded {
            return Err(ClientError::NoActiveResponse);
        }
        Ok(())
    }
}

/// Per-wallet viewer status mirrored from the grant account.
#[derive(Debug, Clone, Copy)]
pub struct ViewerStatus {
    pub role: ViewerRole,
    pub expires_at: i64,
}

impl ViewerStatus {
    pub fn from_account_data(data: &[u8]) -> Result<Self, ClientError> {
        let grant = ViewerGrant::try_deserialize(&mut &data[..])
            .map_err(|e| ClientError::Deserialize(e.to_string()))?;
        Ok(Self {
            role: grant.role,
            expires_at: grant.expires_at,
        })
    }

    pub fn ensure_valid_at(&self, now: i64) -> Result<(), ClientError> {
        if self.expires_at != 0 && now >= self.expires_at {
            return Err(ClientError::ViewerGrantExpired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::{AnchorSerialize, Discriminator};

    fn sample_survey() -> Survey {
        Survey {
            bump: 253,
            tally_state: [[5; 32]; 8],
            id: 11,
            authority: Pubkey::new_unique(),
            nonce: 99,
            title: "Release retro".to_string(),
            description: "What went well?".to_string(),
            options: vec![
                "Planning".to_string(),
                "Execution".to_string(),
                "Comms".to_string(),
            ],
            option_count: 3,
            is_active: true,
            deadline: 5_000,
            respondent_count: 4,
            viewer_count: 1,
        }
    }

    fn account_bytes<T: AnchorSerialize + Discriminator>(value: &T) -> Vec<u8> {
        let mut data = T::DISCRIMINATOR.to_vec();
        value.serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn survey_view_mirrors_account_fields() {
        let survey = sample_survey();
        let data = account_bytes(&survey);
        let view = SurveyView::from_account_data(&data).unwrap();

        assert_eq!(view.id, 11);
        assert_eq!(view.options.len(), 3);
        assert_eq!(view.option_count, 3);
        assert_eq!(view.tally_handles, [[5; 32]; 8]);
        assert_eq!(view.respondent_count, 4);
        assert!(view.is_active);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(SurveyView::from_account_data(&[0u8; 16]).is_err());
    }

    #[test]
    fn closed_or_expired_surveys_fail_preflight() {
        let mut survey = sample_survey();
        survey.is_active = false;
        let closed: SurveyView = survey.into();
        assert!(matches!(
            closed.ensure_accepts_responses(0),
            Err(ClientError::SurveyClosed)
        ));

        let open: SurveyView = sample_survey().into();
        assert!(open.ensure_accepts_responses(4_999).is_ok());
        assert!(matches!(
            open.ensure_accepts_responses(5_000),
            Err(ClientError::DeadlinePassed)
        ));
    }

    #[test]
    fn selection_mask_packs_multiple_options() {
        assert_eq!(selection_mask(&[0], 3).unwrap(), 0b001);
        assert_eq!(selection_mask(&[0, 2], 3).unwrap(), 0b101);
        // order and duplicates do not matter
        assert_eq!(selection_mask(&[2, 0, 2], 3).unwrap(), 0b101);
    }

    #[test]
    fn selection_mask_rejects_bad_input() {
        assert!(matches!(
            selection_mask(&[], 3),
            Err(ClientError::EmptySelection)
        ));
        assert!(matches!(
            selection_mask(&[3], 3),
            Err(ClientError::InvalidOption(3))
        ));
    }

    #[test]
    fn withdraw_then_resubmit_is_allowed() {
        let active = ResponseStatus {
            has_responded: true,
            responded_at: 10,
        };
        assert!(matches!(
            active.ensure_can_submit(),
            Err(ClientError::AlreadyResponded)
        ));
        assert!(active.ensure_can_withdraw().is_ok());

        // after a withdraw the record reads as cleared
        let cleared = ResponseStatus {
            has_responded: false,
            responded_at: 0,
        };
        assert!(cleared.ensure_can_submit().is_ok());
        assert!(matches!(
            cleared.ensure_can_withdraw(),
            Err(ClientError::NoActiveResponse)
        ));
    }

    #[test]
    fn viewer_grant_expiry_is_enforced() {
        let grant = ViewerStatus {
            role: ViewerRole::Analyst,
            expires_at: 100,
        };
        assert!(grant.ensure_valid_at(99).is_ok());
        assert!(matches!(
            grant.ensure_valid_at(100),
            Err(ClientError::ViewerGrantExpired)
        ));

        let permanent = ViewerStatus {
            role: ViewerRole::Auditor,
            expires_at: 0,
        };
        assert!(permanent.ensure_valid_at(i64::MAX).is_ok());
    }
}
