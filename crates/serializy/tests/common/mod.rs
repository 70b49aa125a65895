use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts `WARN` events seen by the subscriber it is attached to.
#[derive(Clone, Default)]
pub struct WarningCounter {
    count: Arc<AtomicUsize>,
}

impl WarningCounter {
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarningCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with the number of warnings it emitted.
pub fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let counter = WarningCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counter.get())
}
