use std::sync::Arc;

use anyhow::Result;
use grammarlite_core::overlay::{below, Anchor, Position};
use grammarlite_core::{
    needs_check, ClientMessage, CorrectionResult, EngineMessage, FieldIds, FieldSnapshot,
    Indicator, MonitoredField, OverlayRegistry,
};
use tokio::sync::mpsc;
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use crate::config::DaemonConfig;
use crate::corrector::CorrectorRouter;
use crate::debounce::Debouncer;

enum SessionEvent {
    Settled(FieldSnapshot),
    Checked {
        field: MonitoredField,
        result: Result<Option<CorrectionResult>>,
    },
    GraceElapsed(String),
}

/// State for one connected page. Everything here is touched only from the
/// session task; timers and backend calls report back through `events`.
pub struct PageSession {
    corrector: Arc<CorrectorRouter>,
    outbound: mpsc::UnboundedSender<EngineMessage>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    debounced: Debouncer<FieldSnapshot>,
    fields: FieldIds,
    overlays: OverlayRegistry,
    indicator: Option<Indicator>,
    anchor: Anchor,
    offset_px: f64,
    min_chars: usize,
    dismiss_grace: Duration,
}

impl PageSession {
    pub fn new(
        config: &DaemonConfig,
        corrector: Arc<CorrectorRouter>,
        outbound: mpsc::UnboundedSender<EngineMessage>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let settled_tx = events_tx.clone();
        let debounced = Debouncer::new(
            Duration::from_millis(config.check.trigger_delay_ms),
            move |snapshot| {
                let _ = settled_tx.send(SessionEvent::Settled(snapshot));
            },
        );
        let indicator = (config.indicator.enable || config.overlay.anchor == Anchor::Indicator)
            .then(|| Indicator::new(config.indicator.rect()));

        Self {
            corrector,
            outbound,
            events_tx,
            events_rx,
            debounced,
            fields: FieldIds::new(),
            overlays: OverlayRegistry::new(config.overlay.association),
            indicator,
            anchor: config.overlay.anchor,
            offset_px: config.overlay.offset_px,
            min_chars: config.check.min_chars,
            dismiss_grace: Duration::from_millis(config.check.dismiss_grace_ms),
        }
    }

    pub async fn run(mut self, mut inbound: mpsc::Receiver<ClientMessage>) {
        if let Some(indicator) = &self.indicator {
            let position = indicator.position();
            self.emit(EngineMessage::ShowIndicator { position });
        }

        loop {
            tokio::select! {
                message = inbound.recv() => match message {
                    Some(ClientMessage::Unload) | None => break,
                    Some(message) => self.handle_client(message),
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event),
            }
        }

        let had_pending = self.debounced.is_pending();
        self.debounced.cancel();
        debug!(
            accepted = self.overlays.accepted(),
            dropped_pending_check = had_pending,
            "page session closed"
        );
    }

    fn handle_client(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::KeyUp { field } => {
                if field.kind.is_monitored() {
                    self.debounced.call(field);
                }
            }
            ClientMessage::FocusOut { field } => self.schedule_dismissal(field),
            ClientMessage::OverlayHover { field_id, hovered } => {
                self.overlays.set_hovered(&field_id, hovered);
            }
            ClientMessage::OverlayClick { field_id } => {
                let messages = self.overlays.accept(&field_id);
                if !messages.is_empty() {
                    info!(
                        field_id = %field_id,
                        total = self.overlays.accepted(),
                        "suggestion accepted"
                    );
                }
                self.emit_all(messages);
            }
            ClientMessage::PointerDown { x, y } => {
                if let Some(indicator) = self.indicator.as_mut() {
                    indicator.pointer_down(x, y);
                }
            }
            ClientMessage::PointerMove { x, y } => {
                let moved = self
                    .indicator
                    .as_mut()
                    .and_then(|indicator| indicator.pointer_move(x, y));
                if let Some(position) = moved {
                    self.emit(EngineMessage::MoveIndicator { position });
                }
            }
            ClientMessage::PointerUp { .. } => {
                if let Some(indicator) = self.indicator.as_mut() {
                    indicator.pointer_up();
                }
            }
            ClientMessage::Ping => self.emit(EngineMessage::Pong),
            ClientMessage::Unload => {}
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Settled(snapshot) => self.start_check(snapshot),
            SessionEvent::Checked { field, result } => self.finish_check(field, result),
            SessionEvent::GraceElapsed(field_id) => {
                if let Some(message) = self.overlays.dismiss(&field_id) {
                    self.emit(message);
                }
            }
        }
    }

    fn start_check(&mut self, snapshot: FieldSnapshot) {
        let field = self.resolve(snapshot);

        if !needs_check(&field.text, self.min_chars) {
            if let Some(message) = self.overlays.remove(&field.id) {
                self.emit(message);
            }
            return;
        }
        if !self.corrector.enabled() {
            return;
        }

        let corrector = self.corrector.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = corrector.correct(&field.text).await;
            let _ = events.send(SessionEvent::Checked { field, result });
        });
    }

    fn finish_check(&mut self, field: MonitoredField, result: Result<Option<CorrectionResult>>) {
        match result {
            Ok(Some(correction)) if correction.is_material() => {
                let position = self.overlay_position(&field);
                let messages = self.overlays.show(&field, &correction, position);
                self.emit_all(messages);
            }
            Ok(Some(_)) => {
                debug!(field_id = %field.id, "backend suggested no changes");
                if let Some(message) = self.overlays.remove(&field.id) {
                    self.emit(message);
                }
            }
            Ok(None) => debug!(field_id = %field.id, "no correction available"),
            Err(error) => warn!("grammar check failed: {error:#}"),
        }
    }

    fn schedule_dismissal(&mut self, snapshot: FieldSnapshot) {
        if !snapshot.kind.is_monitored() {
            return;
        }
        let field = self.resolve(snapshot);
        let events = self.events_tx.clone();
        let grace = self.dismiss_grace;
        tokio::spawn(async move {
            time::sleep(grace).await;
            let _ = events.send(SessionEvent::GraceElapsed(field.id));
        });
    }

    fn resolve(&mut self, snapshot: FieldSnapshot) -> MonitoredField {
        let (field, assigned) = self.fields.resolve(snapshot);
        if let Some(message) = assigned {
            self.emit(message);
        }
        field
    }

    fn overlay_position(&self, field: &MonitoredField) -> Position {
        let anchor = match (self.anchor, &self.indicator) {
            (Anchor::Indicator, Some(indicator)) => indicator.rect(),
            _ => field.rect,
        };
        below(anchor, field.scroll, self.offset_px)
    }

    fn emit(&self, message: EngineMessage) {
        let _ = self.outbound.send(message);
    }

    fn emit_all(&self, messages: Vec<EngineMessage>) {
        for message in messages {
            self.emit(message);
        }
    }
}
