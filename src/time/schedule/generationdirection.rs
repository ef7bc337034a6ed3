use serde::{Deserialize, Serialize};

/// Which end of the schedule the regular periods are anchored to.
/// The stub, if any, ends up at the opposite end.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum GenerationDirection {
    Forward = 1,
    Backward = -1,
}
