#![cfg(feature = "std")]

//! Server side: accepts connections and dispatches requests to the service.

use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, info, warn};
use tokio::net::TcpListener;

use crate::{
    protocol::{Message, PROTOCOL_VERSION},
    service::GameService,
    transport::{tcp::TcpTransport, Transport},
};

/// Serves one client connection against the shared [`GameService`].
pub struct Skeleton<T: Transport> {
    service: Arc<GameService>,
    transport: T,
}

impl<T: Transport> Skeleton<T> {
    pub fn new(service: Arc<GameService>, transport: T) -> Self {
        Self { service, transport }
    }

    async fn handshake(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Handshake { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await
            }
            Message::Handshake { version } => {
                // Tell the client what we speak before closing.
                self.transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
                Err(anyhow!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ))
            }
            other => Err(anyhow!("Expected Handshake, got {:?}", other)),
        }
    }

    /// Answer requests until the client hangs up.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.handshake().await?;
        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) => {
                    debug!("connection finished: {}", e);
                    return Ok(());
                }
            };
            let reply = match msg {
                Message::Request { seq, body } => Message::Response {
                    seq,
                    body: self.service.handle(body),
                },
                other => return Err(anyhow!("Expected Request, got {:?}", other)),
            };
            self.transport.send(reply).await?;
        }
    }
}

/// Accept clients forever, one task per connection.
pub async fn serve(listener: TcpListener, service: Arc<GameService>) -> anyhow::Result<()> {
    info!("listening on {}", listener.local_addr()?);
    loop {
        let (stream, addr) = listener.accept().await?;
        if let Err(e) = stream.set_nodelay(true) {
            warn!("{}: set_nodelay failed: {}", addr, e);
        }
        debug!("client connected from {}", addr);
        let mut skeleton = Skeleton::new(service.clone(), TcpTransport::new(stream));
        tokio::spawn(async move {
            if let Err(e) = skeleton.run().await {
                warn!("{}: {}", addr, e);
            }
        });
    }
}
