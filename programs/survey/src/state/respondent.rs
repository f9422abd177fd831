use anchor_lang::prelude::*;

/// Per-wallet response record. Guarantees at most one active response per
/// address: submitting sets the flag, withdrawing clears it again.
///
/// The chosen options are kept only as the respondent's own ciphertext
/// handle; the plaintext selection never touches the chain.
#[account]
#[derive(InitSpace)]
pub struct RespondentRecord {
    /// PDA bump seed
    pub bump: u8,
    pub survey: Pubkey,
    pub respondent: Pubkey,
    /// Whether this wallet currently has a counted response
    pub has_responded: bool,
    /// The respondent's encrypted selection mask, as submitted
    pub selection_ciphertext: [u8; 32],
    /// Nonce the selection was encrypted with
    pub selection_nonce: u128,
    /// x25519 public key the selection was encrypted for
    pub encryption_pubkey: [u8; 32],
    pub responded_at: i64,
}

impl RespondentRecord {
    /// Withdraw the active response. The aggregated tally is deliberately
    /// NOT reversed; clearing the record only frees the wallet to submit a
    /// fresh response.
    pub fn clear(&mut self) {
        self.has_responded = false;
        self.selection_ciphertext = [0; 32];
        self.selection_nonce = 0;
        self.encryption_pubkey = [0; 32];
        self.responded_at = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_the_response_but_keeps_identity() {
        let survey = Pubkey::new_unique();
        let respondent = Pubkey::new_unique();
        let mut record = RespondentRecord {
            bump: 255,
            survey,
            respondent,
            has_responded: true,
            selection_ciphertext: [9; 32],
            selection_nonce: 77,
            encryption_pubkey: [3; 32],
            responded_at: 123,
        };

        record.clear();

        assert!(!record.has_responded);
        assert_eq!(record.selection_ciphertext, [0; 32]);
        assert_eq!(record.selection_nonce, 0);
        assert_eq!(record.survey, survey);
        assert_eq!(record.respondent, respondent);
    }
}
