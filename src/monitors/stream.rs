use std::{future::Future, sync::Arc};

use crate::{
    ConnectionState, EventBus, Monitor, ResourceId, ResourceKind, Result, threshold,
};

/// A message read from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMessage {
    payload: String,
}

impl StreamMessage {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Narrow interface to a stream/broker consumer.
///
/// `poll` returning `Ok(None)` means no message was waiting, which is a
/// valid outcome and not an error. Replace the demo fakes with a real
/// client conforming to this contract; the monitor's logic stays unchanged.
pub trait StreamClient: Send {
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;
    fn poll(&mut self) -> impl Future<Output = Result<Option<StreamMessage>>> + Send;
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Processing step applied to each received message.
///
/// Invoked exactly once per message the client yields. Any `FnMut` closure
/// over `&StreamMessage` qualifies.
pub trait MessageProcessor: Send {
    fn process(&mut self, message: &StreamMessage);
}

impl<F: FnMut(&StreamMessage) + Send> MessageProcessor for F {
    fn process(&mut self, message: &StreamMessage) {
        self(message)
    }
}

/// Reads the next available message from a stream topic each poll and hands
/// it to a pluggable processor.
///
/// Deliberately decision-free with respect to thresholds: this monitor
/// shows that the [`Monitor`] capability generalizes to arbitrary per-poll
/// reactive work. Connection and read failures still follow the shared
/// monitoring-error event path.
pub struct StreamMonitor<C, P> {
    topic: Arc<str>,
    client: C,
    processor: P,
    bus: Arc<EventBus>,
    state: ConnectionState,
}

impl<C: StreamClient, P: MessageProcessor> StreamMonitor<C, P> {
    pub fn new(topic: &str, client: C, processor: P, bus: Arc<EventBus>) -> Self {
        Self {
            topic: Arc::from(topic),
            client,
            processor,
            bus,
            state: ConnectionState::Unconnected,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    fn target(&self) -> ResourceId {
        ResourceId::new(ResourceKind::Stream, &self.topic)
    }

    async fn ensure_connected(&mut self) -> Result<()> {
        if self.state != ConnectionState::Connected {
            self.client.connect().await?;
            self.state = ConnectionState::Connected;
            tracing::debug!(topic = %self.topic, "connected");
        }
        Ok(())
    }
}

impl<C: StreamClient, P: MessageProcessor> Monitor for StreamMonitor<C, P> {
    async fn poll(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }

        if let Err(e) = self.ensure_connected().await {
            self.bus
                .publish(&threshold::monitoring_failure(&self.target(), &e));
            return;
        }

        match self.client.poll().await {
            Ok(Some(message)) => {
                tracing::debug!(topic = %self.topic, "message received");
                self.processor.process(&message);
            }
            Ok(None) => {
                tracing::trace!(topic = %self.topic, "no new messages");
            }
            Err(e) => {
                // Stale consumer; reconnect on the next poll.
                self.state = ConnectionState::Unconnected;
                self.bus
                    .publish(&threshold::monitoring_failure(&self.target(), &e));
            }
        }
    }

    async fn close(&mut self) {
        if self.state == ConnectionState::Connected {
            if let Err(e) = self.client.close().await {
                self.bus
                    .publish(&threshold::monitoring_failure(&self.target(), &e));
            }
        }
        self.state = ConnectionState::Closed;
    }

    fn state(&self) -> ConnectionState {
        self.state
    }
}
