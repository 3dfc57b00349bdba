//! Core math modules.

pub mod complexity;
pub mod frequency;
pub mod oracle;
pub mod regret;
pub mod stable;
