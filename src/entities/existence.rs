use serde::Serialize;

/// Outcome of a single registry probe.
///
/// `Unknown` covers network errors and timeouts only. It is treated as
/// existing: an unreachable registry never blocks an answer. Any HTTP answer
/// other than a success status is `NotExists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Existence {
    Exists,
    NotExists,
    Unknown,
}

impl Existence {
    pub fn is_satisfied(self) -> bool {
        !matches!(self, Existence::NotExists)
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Existence::Exists,
            _ => Existence::NotExists,
        }
    }
}
