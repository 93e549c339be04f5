use crate::models::notification::Notification;

/// Audio cue shape, mapped from notification priority (one beep for
/// low up to the urgent pattern for critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundPattern {
    Single,
    Double,
    Triple,
    Urgent,
}

/// Visual delivery surface (desktop popups, browser notifications).
/// Implementations own the platform permission model; the engine only
/// asks for permission once and treats a denial as "channel off".
pub trait DesktopNotifier: Send {
    fn permission_granted(&self) -> bool;

    /// One-shot permission prompt. Returns the resulting grant state.
    fn request_permission(&mut self) -> bool;

    /// Display a notification. Failures stay inside the implementation;
    /// delivery is fire-and-forget.
    fn show(&mut self, notification: &Notification);
}

/// Audio delivery surface.
pub trait SoundPlayer: Send {
    /// Play a cue. Fire-and-forget, like [`DesktopNotifier::show`].
    fn play(&mut self, pattern: SoundPattern);
}
