#![forbid(unsafe_code)]

//! Audio failures degrade to silent playback.
//!
//! Covers:
//! 1. A device whose output breaks mid-playback stops producing tones
//! 2. The visual replay still runs to the sorted end
//! 3. Exactly one WARN is logged for the failure; later drops are DEBUG
//! 4. The process-wide device is released afterwards
//!
//! Everything lives in one test because the device is process-wide.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use sortsynth_core::{Algorithm, is_sorted};
use sortsynth_runtime::{
    AudioConfig, AudioDevice, PlaybackConfig, Scheduler, Session, TickOutcome,
};
use tracing_subscriber::layer::SubscriberExt;
use web_time::Duration;

// ============================================================================
// Tracing capture infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{value:?}"));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

/// Accepts `budget` writes, then fails every write.
struct FlakyOutput {
    budget: usize,
}

impl Write for FlakyOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "speaker unplugged",
            ));
        }
        self.budget -= 1;
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn broken_audio_output_degrades_to_silent_playback() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);

    let (outcome, sorted, stats) = tracing::subscriber::with_default(subscriber, || {
        let config = AudioConfig {
            tone_duration: Duration::from_millis(1),
            ..AudioConfig::default()
        };
        let device = AudioDevice::acquire(config, Box::new(FlakyOutput { budget: 3 }))
            .expect("device is free");
        let scheduler = Scheduler::new(
            |_: &[f64]| {},
            device,
            PlaybackConfig::default().with_step_interval(Duration::from_micros(10)),
        );
        let mut session = Session::seeded(scheduler, 12, 42);
        session.request_sort(Algorithm::Bubble);
        let outcome = session.run_until_idle();
        let sorted = is_sorted(session.values());
        let stats = session.scheduler().stats();

        let (_renderer, device) = session.into_scheduler().into_parts();
        assert!(!device.is_available());
        assert_eq!(device.tones_written(), 3);
        device.release().expect("flush succeeds");
        (outcome, sorted, stats)
    });

    assert!(matches!(outcome, TickOutcome::Finished { .. }));
    assert!(sorted);
    assert!(!AudioDevice::is_held());
    assert_eq!(stats.tones_emitted, 3);
    assert!(stats.tones_dropped > 0);
    assert_eq!(
        stats.tones_emitted + stats.tones_dropped,
        2 * stats.steps_applied
    );

    let events = events.lock().unwrap();
    let warns: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN && e.target == "sortsynth.audio")
        .collect();
    assert_eq!(warns.len(), 1, "{warns:?}");
    assert!(warns[0].fields["error"].contains("speaker unplugged"));

    let dropped = events
        .iter()
        .filter(|e| e.level == tracing::Level::DEBUG && e.target == "sortsynth.audio")
        .count() as u64;
    assert_eq!(dropped, stats.tones_dropped - 1);
}
