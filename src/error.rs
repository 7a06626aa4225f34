/// Failures reported by the render, input and overlay collaborators.
///
/// These are never handled by the controller; they propagate out of
/// [`InteractionController::step`](crate::InteractionController::step)
/// to whoever drives the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error("display write failed")]
    Display,
    #[error("input device failed")]
    Input,
    #[error("name entry overlay failed")]
    NameEntry,
}

/// Settings persistence failures. Logged and swallowed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    #[error("settings storage is full")]
    Full,
    #[error("settings backend unavailable")]
    Unavailable,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
