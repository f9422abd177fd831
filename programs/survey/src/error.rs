use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid authority")]
    InvalidAuthority,
    #[msg("Computation was aborted")]
    AbortedComputation,
    #[msg("Cluster not set")]
    ClusterNotSet,
    #[msg("Survey is not accepting responses")]
    SurveyInactive,
    #[msg("Survey is already active")]
    SurveyAlreadyActive,
    #[msg("Survey deadline has passed")]
    DeadlinePassed,
    #[msg("Deadline must be in the future")]
    InvalidDeadline,
    #[msg("New deadline must be later than the current one")]
    DeadlineNotExtended,
    #[msg("A survey needs at least two options")]
    TooFewOptions,
    #[msg("Too many survey options")]
    TooManyOptions,
    #[msg("Option label exceeds the maximum length")]
    OptionLabelTooLong,
    #[msg("Expiry must be in the future")]
    InvalidExpiry,
    #[msg("Caller already has an active response")]
    AlreadyResponded,
    #[msg("Caller has no active response to withdraw")]
    NoActiveResponse,
    #[msg("Caller is not an authorized viewer")]
    ViewerNotAuthorized,
    #[msg("Viewer grant has expired")]
    ViewerGrantExpired,
}
