//! Change notification for the presentation layer.

/// Receives a payload-free signal after every successful command.
///
/// Listeners re-query the engine for whatever they display.
///
/// ```
/// use forbidden_island::rules::ChangeListener;
///
/// let mut redraws = 0;
/// let mut listener = || redraws += 1;
/// listener.state_changed();
/// assert_eq!(redraws, 1);
/// ```
pub trait ChangeListener {
    fn state_changed(&mut self);
}

impl<F: FnMut()> ChangeListener for F {
    fn state_changed(&mut self) {
        self();
    }
}
