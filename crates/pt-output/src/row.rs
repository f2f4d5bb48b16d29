//! Plain data row types written by output backends.

/// Where one placed entity was after a tick's move.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub tick:      u64,
    pub entity_id: String,
    pub latitude:  f64,
    pub longitude: f64,
}

/// One fired proximity alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow {
    pub tick:            u64,
    pub entity_id:       String,
    pub distance_m:      u32,
    pub signal_strength: u8,
}
