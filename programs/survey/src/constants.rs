use arcium_anchor::prelude::*;

// Computation definition offsets for each encrypted instruction
pub const COMP_DEF_OFFSET_INIT_SURVEY_TALLIES: u32 = comp_def_offset("init_survey_tallies");
pub const COMP_DEF_OFFSET_SUBMIT_RESPONSE: u32 = comp_def_offset("submit_response");
pub const COMP_DEF_OFFSET_SHARE_TALLIES: u32 = comp_def_offset("share_tallies");

/// Number of encrypted tally slots reserved per survey. Surveys may use
/// fewer options; unused slots stay at their encrypted-zero value.
pub const MAX_OPTIONS: usize = 8;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTION_LABEL_LEN: usize = 32;
