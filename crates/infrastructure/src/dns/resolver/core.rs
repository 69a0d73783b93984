//! Pipelining resolver.
//!
//! A [`Resolver`] is a cheap handle onto a background worker task that owns
//! the transport and a FIFO of pending queries. The worker runs one exchange
//! at a time: the response (or error) it gets is handed to whichever query
//! is at the head of the queue, then the next query is sent.

use super::config::ResolverOptions;
use super::state::ResolverState;
use crate::dns::forwarding::MessageBuilder;
use crate::dns::transport::{create_transport, DnsTransport};
use crate::dns::wire::{decode_message, encode_message};
use bytes::Bytes;
use dnspipe_domain::{DnsProtocol, DomainError, Message, RecordType, ResolverConfig};
use std::collections::VecDeque;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace, warn};

/// Completion handler for one query. Invoked exactly once, on the worker task.
pub type ResolveCallback = Box<dyn FnOnce(Result<Message, DomainError>) + Send + 'static>;

struct PendingQuery {
    id: u16,
    bytes: Bytes,
    callback: ResolveCallback,
}

#[derive(Clone)]
pub struct Resolver {
    requests: mpsc::UnboundedSender<PendingQuery>,
    state: watch::Receiver<ResolverState>,
    protocol_name: &'static str,
}

impl Resolver {
    /// Starts a resolver for `protocol`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new(protocol: &DnsProtocol, options: ResolverOptions) -> Self {
        Self::with_transport(create_transport(protocol), options)
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        let protocol = config.protocol().map_err(DomainError::InvalidEndpoint)?;
        Ok(Self::new(&protocol, ResolverOptions::from(config)))
    }

    /// Starts a resolver over an already constructed transport.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn with_transport<T>(transport: T, options: ResolverOptions) -> Self
    where
        T: DnsTransport + 'static,
    {
        let (requests, receiver) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(ResolverState::Idle);
        let protocol_name = transport.protocol_name();

        let worker = Worker {
            transport,
            options,
            state: state_tx,
            queue: VecDeque::new(),
        };
        tokio::spawn(worker.run(receiver));

        debug!(
            protocol = protocol_name,
            timeout_ms = options
                .timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            verify_id = options.verify_transaction_id,
            "Resolver started"
        );

        Self {
            requests,
            state,
            protocol_name,
        }
    }

    /// Serializes `query` and queues it behind every query already submitted.
    ///
    /// Encoding errors are returned here and the callback is dropped unused.
    /// Otherwise the callback later receives the decoded response or the
    /// error that ended the exchange.
    pub fn async_resolve<F>(&self, query: &Message, callback: F) -> Result<(), DomainError>
    where
        F: FnOnce(Result<Message, DomainError>) + Send + 'static,
    {
        let bytes = encode_message(query)?;
        let pending = PendingQuery {
            id: query.id(),
            bytes,
            callback: Box::new(callback),
        };
        self.requests
            .send(pending)
            .map_err(|_| DomainError::ResolverShutdown)
    }

    pub async fn resolve(&self, query: &Message) -> Result<Message, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.async_resolve(query, move |result| {
            let _ = tx.send(result);
        })?;
        rx.await.map_err(|_| DomainError::ResolverShutdown)?
    }

    /// Sends a recursive `IN` query for `domain` with a random ID.
    pub async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Message, DomainError> {
        let query = MessageBuilder::query_message(domain, &record_type)?;
        self.resolve(&query).await
    }

    pub fn state(&self) -> ResolverState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ResolverState> {
        self.state.clone()
    }

    pub fn protocol_name(&self) -> &'static str {
        self.protocol_name
    }
}

struct Worker<T> {
    transport: T,
    options: ResolverOptions,
    state: watch::Sender<ResolverState>,
    queue: VecDeque<PendingQuery>,
}

impl<T: DnsTransport> Worker<T> {
    async fn run(mut self, mut requests: mpsc::UnboundedReceiver<PendingQuery>) {
        loop {
            while let Ok(query) = requests.try_recv() {
                self.queue.push_back(query);
            }

            if self.queue.is_empty() {
                self.set_state(ResolverState::Idle);
                match requests.recv().await {
                    Some(query) => self.queue.push_back(query),
                    None => break,
                }
            }

            self.complete_head().await;
        }

        self.transport.reset();
        self.set_state(ResolverState::Closed);
        debug!(
            protocol = self.transport.protocol_name(),
            "Resolver worker stopped"
        );
    }

    async fn complete_head(&mut self) {
        let Some(head) = self.queue.front() else {
            return;
        };
        let (id, bytes) = (head.id, head.bytes.clone());

        let result = self.exchange(id, &bytes).await;
        self.set_state(ResolverState::Dispatching);

        if let Err(e) = &result {
            warn!(
                protocol = self.transport.protocol_name(),
                id = id,
                error = %e,
                "DNS query failed"
            );
        }

        if let Some(query) = self.queue.pop_front() {
            (query.callback)(result);
        }
    }

    async fn exchange(&mut self, id: u16, bytes: &[u8]) -> Result<Message, DomainError> {
        let outcome = match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(id, bytes))
                .await
                .unwrap_or(Err(DomainError::QueryTimeout)),
            None => self.round_trip(id, bytes).await,
        };

        // A malformed reply leaves the framing intact; anything else may not.
        if let Err(e) = &outcome {
            if !matches!(e, DomainError::Wire(_)) {
                self.transport.reset();
            }
        }
        outcome
    }

    async fn round_trip(&mut self, id: u16, bytes: &[u8]) -> Result<Message, DomainError> {
        if self.transport.needs_connect() {
            self.set_state(ResolverState::Connecting);
            self.transport.connect().await?;
        }

        self.set_state(ResolverState::Sending);
        self.transport.send(bytes).await?;

        loop {
            let message = decode_message(&self.receive().await?)?;
            if !self.options.verify_transaction_id || message.id() == id {
                return Ok(message);
            }

            // On a stream the stray reply has taken the head query's slot, so
            // the stream is dropped. A stray datagram is skipped.
            if self.transport.is_stream() {
                return Err(DomainError::TransactionIdMismatch {
                    expected: id,
                    received: message.id(),
                });
            }
            debug!(
                protocol = self.transport.protocol_name(),
                expected = id,
                received = message.id(),
                "Discarding response with unexpected transaction ID"
            );
        }
    }

    async fn receive(&mut self) -> Result<Vec<u8>, DomainError> {
        if self.transport.is_stream() {
            self.set_state(ResolverState::ReceivingLength);
        }
        let length = self.transport.read_length().await?;

        self.set_state(ResolverState::ReceivingBody);
        self.transport.read_body(length).await
    }

    fn set_state(&self, next: ResolverState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            trace!(
                from = %previous,
                to = %next,
                queued = self.queue.len(),
                "Resolver state changed"
            );
        }
    }
}
