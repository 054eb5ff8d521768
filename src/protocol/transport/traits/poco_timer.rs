//! Timer seam used by the listener to bound its listening window.

/// Asynchronous delay source (embassy timer, tokio sleep, ...).
pub trait PocoTimer {
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}
