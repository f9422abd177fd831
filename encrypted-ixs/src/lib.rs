use arcis_imports::*;

#[encrypted]
mod circuits {
    use arcis_imports::*;

    /// Encrypted per-option response tallies for one survey.
    ///
    /// A survey exposes up to 8 options; slots at or beyond the survey's
    /// option count keep their encrypted-zero value forever.
    pub struct SurveyTallies {
        counts: [u64; 8],
    }

    /// A single respondent's selection, encoded as a bitmask over option
    /// indices (bit i set = option i chosen). One response may select
    /// several options at once.
    pub struct ResponseSelection {
        mask: u8,
    }

    /// Initializes the encrypted tally counters for a new survey.
    ///
    /// Creates a SurveyTallies structure with zero counts for all option
    /// slots. The counters remain encrypted and can only be updated through
    /// MPC operations.
    #[instruction]
    pub fn init_survey_tallies(mxe: Mxe) -> Enc<Mxe, SurveyTallies> {
        let tallies = SurveyTallies { counts: [0; 8] };
        mxe.from_arcis(tallies)
    }

    /// Folds one encrypted response into the running tallies.
    ///
    /// Adds 1 to every option whose bit is set in the selection mask,
    /// without revealing which options were chosen. Bits at or beyond
    /// `option_count` are dropped, so a malformed mask cannot touch
    /// unused tally slots.
    ///
    /// # Arguments
    /// * `option_count` - Number of options this survey actually exposes
    /// * `selection_ctxt` - The respondent's encrypted selection mask
    /// * `tallies_ctxt` - Current encrypted per-option tallies
    ///
    /// # Returns
    /// Updated encrypted tallies with the new response included
    #[instruction]
    pub fn submit_response(
        option_count: u8,
        selection_ctxt: Enc<Shared, ResponseSelection>,
        tallies_ctxt: Enc<Mxe, SurveyTallies>,
    ) -> Enc<Mxe, SurveyTallies> {
        let selection = selection_ctxt.to_arcis();
        let mut tallies = tallies_ctxt.to_arcis();

        // One increment per set bit. Must use explicit conditionals to
        // avoid information leakage in encrypted circuits.
        for i in 0..8 {
            if (i as u8) < option_count && (selection.mask >> i) & 1 == 1 {
                tallies.counts[i] += 1;
            }
        }

        tallies_ctxt.owner.from_arcis(tallies)
    }

    /// Re-encrypts the current tallies to an authorized viewer's key.
    ///
    /// The tallies themselves are never revealed on-chain: the cluster
    /// re-seals them under the viewer's x25519 key, and only that viewer
    /// can decrypt the counts client-side.
    ///
    /// # Arguments
    /// * `viewer` - The viewer's shared encryption context
    /// * `tallies_ctxt` - Encrypted per-option tallies to share
    ///
    /// # Returns
    /// The tallies encrypted under the viewer's key
    #[instruction]
    pub fn share_tallies(
        viewer: Shared,
        tallies_ctxt: Enc<Mxe, SurveyTallies>,
    ) -> Enc<Shared, SurveyTallies> {
        let tallies = tallies_ctxt.to_arcis();
        viewer.from_arcis(tallies)
    }
}
