
use crate::parse::{FixedClock, LineParser, ParseContext};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

pub(crate) fn dump_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
}

pub(crate) fn parser() -> LineParser {
    let ctx = ParseContext::new("wf-1").with_clock(Arc::new(FixedClock(dump_time())));
    LineParser::new(ctx)
}

/// Run `f` with a scoped subscriber and return the messages of every
/// WARN event it emitted.
pub(crate) fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    use std::sync::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    struct WarnLayer(Arc<Mutex<Vec<String>>>);

    struct MessageVisitor<'a>(&'a mut Option<String>);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                *self.0 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for WarnLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != Level::WARN {
                return;
            }
            let mut message = None;
            event.record(&mut MessageVisitor(&mut message));
            self.0.lock().unwrap().push(message.unwrap_or_default());
        }
    }

    let warnings = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(WarnLayer(warnings.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);

    let warnings = warnings.lock().unwrap().clone();
    (result, warnings)
}
