use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

/// Collapses bursts of calls into one handler invocation, `delay` after the
/// last call, carrying the last call's argument.
pub struct Debouncer<T> {
    delay: Duration,
    handler: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, handler: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            handler: Arc::new(handler),
            pending: None,
        }
    }

    pub fn call(&mut self, value: T) {
        self.cancel();

        let handler = self.handler.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            handler(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        (fired, move |value| sink.lock().unwrap().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_argument() {
        let (fired, handler) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(1500), handler);

        for value in 1..=5 {
            debouncer.call(value);
            time::sleep(Duration::from_millis(400)).await;
        }
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(*fired.lock().unwrap(), vec![5]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_delay_after_last_call() {
        let (fired, handler) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300), handler);

        debouncer.call(1);
        time::sleep(Duration::from_millis(299)).await;
        assert!(fired.lock().unwrap().is_empty());
        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_calls_each_fire() {
        let (fired, handler) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), handler);

        debouncer.call(1);
        time::sleep(Duration::from_millis(150)).await;
        debouncer.call(2);
        time::sleep(Duration::from_millis(150)).await;
        assert_eq!(*fired.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_discard_pending_call() {
        let (fired, handler) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), handler);
        debouncer.call(1);
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        debouncer.call(2);
        drop(debouncer);
        time::sleep(Duration::from_millis(500)).await;
        assert!(fired.lock().unwrap().is_empty());
    }
}
