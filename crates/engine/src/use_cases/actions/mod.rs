//! Tile action use cases.

mod execute_action;
mod rules;

pub use execute_action::{ExecuteAction, ExecuteActionError};
pub use rules::{hazard_for, rule_for, ActionRule};

use std::sync::Arc;

/// Container for action use cases.
pub struct ActionUseCases {
    pub execute: Arc<ExecuteAction>,
}

impl ActionUseCases {
    pub fn new(execute: Arc<ExecuteAction>) -> Self {
        Self { execute }
    }
}
