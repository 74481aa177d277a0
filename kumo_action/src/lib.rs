mod action;
mod output;
mod policy;

pub use crate::action::{Action, ActionCategory};
pub use crate::output::{OutputKind, OutputKindSet};
pub use crate::policy::{ActionPolicy, classify};
