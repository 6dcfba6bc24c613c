//! C4/C5: building and parsing the SAE-PK confirm element.
//!
//! [`build`] is the AP side, [`parse`] is the STA side. They are each other's
//! inverse: the vendor specific element `build::ApConfirmBuilder` produces is
//! exactly what `parse::StaConfirmParser` expects to find among a frame's
//! information elements.

mod build;
mod parse;

pub use build::ApConfirmBuilder;
pub use parse::{ConfirmOutcome, StaConfirmParser, VerifiedApKey};
