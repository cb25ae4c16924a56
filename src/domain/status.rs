// Refresh status indicator
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusState {
    #[default]
    Loading,
    Ok,
    Error,
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusState::Loading => "loading",
            StatusState::Ok => "ok",
            StatusState::Error => "error",
        };
        f.write_str(label)
    }
}
