pub mod events;
pub mod respondent;
pub mod survey;
pub mod viewer;

pub use events::*;
pub use respondent::*;
pub use survey::*;
pub use viewer::*;
