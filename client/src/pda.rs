//! PDA derivation mirroring the program's seed schema.

use solana_sdk::pubkey::Pubkey;

pub fn survey_pda(program_id: &Pubkey, authority: &Pubkey, survey_id: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"survey", authority.as_ref(), &survey_id.to_le_bytes()],
        program_id,
    )
}

pub fn respondent_pda(program_id: &Pubkey, survey: &Pubkey, wallet: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"respondent", survey.as_ref(), wallet.as_ref()],
        program_id,
    )
}

pub fn viewer_pda(program_id: &Pubkey, survey: &Pubkey, viewer: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"viewer", survey.as_ref(), viewer.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        assert_eq!(
            survey_pda(&program_id, &authority, 7),
            survey_pda(&program_id, &authority, 7)
        );
    }

    #[test]
    fn distinct_inputs_give_distinct_addresses() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let (a, _) = survey_pda(&program_id, &authority, 1);
        let (b, _) = survey_pda(&program_id, &authority, 2);
        assert_ne!(a, b);

        let wallet_1 = Pubkey::new_unique();
        let wallet_2 = Pubkey::new_unique();
        let (r1, _) = respondent_pda(&program_id, &a, &wallet_1);
        let (r2, _) = respondent_pda(&program_id, &a, &wallet_2);
        assert_ne!(r1, r2);

        // respondent and viewer records for the same wallet live at
        // different addresses
        let (v1, _) = viewer_pda(&program_id, &a, &wallet_1);
        assert_ne!(r1, v1);
    }
}
