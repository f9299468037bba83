//! Host tick lifecycle

/// A routine ticked once per control period by a single host thread
///
/// The host calls `on_start` once, then `on_loop` every period until
/// `is_done` reports true or it decides to end the routine, then `on_stop`.
pub trait Loopable {
    fn on_start(&mut self);

    fn on_loop(&mut self);

    fn is_done(&self) -> bool;

    fn on_stop(&mut self);
}
