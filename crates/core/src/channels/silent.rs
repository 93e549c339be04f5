use crate::channels::traits::{DesktopNotifier, SoundPattern, SoundPlayer};
use crate::models::notification::Notification;

/// Visual channel that drops everything. Default for headless hosts;
/// permission always reads as denied.
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl DesktopNotifier for SilentNotifier {
    fn permission_granted(&self) -> bool {
        false
    }

    fn request_permission(&mut self) -> bool {
        false
    }

    fn show(&mut self, _notification: &Notification) {}
}

/// Audio channel that drops everything.
#[derive(Debug, Default)]
pub struct SilentSound;

impl SoundPlayer for SilentSound {
    fn play(&mut self, _pattern: SoundPattern) {}
}
