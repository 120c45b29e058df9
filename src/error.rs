pub type MenuResult<T> = Result<T, MenuError>;

/// Failures that can surface from building the menu sequence.
///
/// Everything else (toggling before mount, activating an out-of-range link,
/// a partial target set) is absorbed locally as a logged no-op.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    #[error("menu sequence already built for this mount")]
    AlreadyMounted,

    #[error("overlay target missing from surface")]
    OverlayMissing,
}
