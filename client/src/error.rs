use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("rpc request failed: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("failed to deserialize account data: {0}")]
    Deserialize(String),

    #[error("survey is not accepting responses")]
    SurveyClosed,

    #[error("survey deadline has passed")]
    DeadlinePassed,

    #[error("wallet already has an active response")]
    AlreadyResponded,

    #[error("wallet has no active response to withdraw")]
    NoActiveResponse,

    #[error("option index {0} is out of range")]
    InvalidOption(u8),

    #[error("a response must select at least one option")]
    EmptySelection,

    #[error("wallet is not an authorized viewer")]
    NotAuthorized,

    #[error("viewer grant has expired")]
    ViewerGrantExpired,
}
