use std::time::Duration;

/// Port for the blocking backoff wait
pub trait Sleeper: Send {
    fn sleep(&self, delay: Duration);
}

/// Sleeps the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
