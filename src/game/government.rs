use serde::{Deserialize, Serialize};

/// An elected president and chancellor, by seat.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Government {
    pub president: usize,
    pub chancellor: usize,
}

