//! Log capture for tests that count ERROR events

use std::fmt::Write as _;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct ErrorCollector {
    events: Arc<Mutex<Vec<String>>>,
}

#[derive(Default)]
struct Fields(String);

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        let _ = write!(self.0, "{}={:?}", field.name(), value);
    }
}

impl<S: Subscriber> Layer<S> for ErrorCollector {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            let mut fields = Fields::default();
            event.record(&mut fields);
            self.events.lock().unwrap().push(fields.0);
        }
    }
}

/// Run `future` on the current thread and return its output together with
/// every ERROR event it emitted, rendered as `field=value` pairs
pub(crate) async fn capture_errors<F: Future>(future: F) -> (F::Output, Vec<String>) {
    let collector = ErrorCollector::default();
    let subscriber = tracing_subscriber::registry().with(collector.clone());

    let guard = tracing::subscriber::set_default(subscriber);
    let output = future.await;
    drop(guard);

    let events = collector.events.lock().unwrap().clone();
    (output, events)
}
