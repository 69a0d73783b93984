#![allow(dead_code)]
use dnspipe_infrastructure::dns::wire::{decode_message, encode_message};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

use super::builders::answer_for;

/// Maps a raw query to a raw response; `None` means stay silent.
pub type Responder = Arc<dyn Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync>;

pub fn echo_answers() -> Responder {
    Arc::new(|query: &[u8]| {
        let message = decode_message(query).ok()?;
        Some(encode_message(&answer_for(&message)).ok()?.to_vec())
    })
}

pub fn silent() -> Responder {
    Arc::new(|_: &[u8]| None)
}

pub fn fixed(response: Vec<u8>) -> Responder {
    Arc::new(move |_: &[u8]| Some(response.clone()))
}

pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    connections: Arc<AtomicUsize>,
}

impl MockDnsServer {
    pub async fn udp(responder: Responder) -> Result<Self, std::io::Error> {
        Self::udp_repeating(responder, None).await
    }

    /// Like [`MockDnsServer::udp`], but the response to the `nth` query
    /// (counting from 1) is sent twice.
    pub async fn udp_duplicating(
        responder: Responder,
        nth: usize,
    ) -> Result<Self, std::io::Error> {
        Self::udp_repeating(responder, Some(nth)).await
    }

    async fn udp_repeating(
        responder: Responder,
        duplicate: Option<usize>,
    ) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let log = Arc::clone(&received);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let seen = {
                                let mut log = log.lock().unwrap();
                                log.push(buf[..len].to_vec());
                                log.len()
                            };
                            if let Some(response) = responder(&buf[..len]) {
                                let copies = if duplicate == Some(seen) { 2 } else { 1 };
                                for _ in 0..copies {
                                    let _ = socket.send_to(&response, peer).await;
                                }
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            received,
            connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Serves length-prefixed queries, one connection at a time. Each
    /// response is written as two separate writes (prefix, then body).
    pub async fn tcp(responder: Responder) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let log = Arc::clone(&received);
        let accepted = Arc::clone(&connections);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            accepted.fetch_add(1, Ordering::SeqCst);
                            Self::serve_tcp(stream, Arc::clone(&responder), Arc::clone(&log)).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            received,
            connections,
        })
    }

    async fn serve_tcp(
        mut stream: TcpStream,
        responder: Responder,
        log: Arc<Mutex<Vec<Vec<u8>>>>,
    ) {
        loop {
            let mut len_buf = [0u8; 2];
            if stream.read_exact(&mut len_buf).await.is_err() {
                return;
            }
            let mut body = vec![0u8; u16::from_be_bytes(len_buf) as usize];
            if stream.read_exact(&mut body).await.is_err() {
                return;
            }

            let mut frame = len_buf.to_vec();
            frame.extend_from_slice(&body);
            log.lock().unwrap().push(frame);

            let Some(response) = responder(&body) else {
                // Hang up without answering.
                return;
            };

            let prefix = (response.len() as u16).to_be_bytes();
            if stream.write_all(&prefix).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
            if stream.write_all(&response).await.is_err() {
                return;
            }
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Raw bytes received so far. TCP entries include the length prefix.
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
