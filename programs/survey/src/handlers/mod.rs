pub mod create_survey;
pub use create_survey::*;

pub mod submit_response;
pub use submit_response::*;

pub mod withdraw_response;
pub use withdraw_response::*;

pub mod viewers;
pub use viewers::*;

pub mod lifecycle;
pub use lifecycle::*;

pub mod share_tallies;
pub use share_tallies::*;
