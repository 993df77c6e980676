use serde::{Deserialize, Serialize};

/// Move-count thresholds that drive the stage machine.
///
/// Missing fields fall back to the defaults, so a collaborator can send a
/// partial object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleConfig {
    /// The Go stage ends once `move` reaches this value.
    pub othello_switch_move: u32,
    /// Passing is refused in the Go stage while `move` is below this value.
    pub pass_unlock_move: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            othello_switch_move: 60,
            pass_unlock_move: 40,
        }
    }
}
