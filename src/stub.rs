#![cfg(feature = "std")]

//! Client side proxy for the five game operations.

use std::fmt;

use tokio::net::ToSocketAddrs;
use tokio::time::Duration;

use crate::{
    common::GameError,
    game::{Placement, Snapshot},
    protocol::{FireReport, Message, Request, Response, PROTOCOL_VERSION},
    transport::{tcp::TcpTransport, Transport},
};

/// Failure seen by a client.
///
/// `Connectivity` means the service could not be reached, timed out or
/// answered with something that does not parse; `Rejected` is an ordinary
/// domain refusal.
#[derive(Debug)]
pub enum ClientError {
    Connectivity(anyhow::Error),
    Rejected(GameError),
}

impl ClientError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connectivity(_))
    }

    /// The domain rejection, if this is one.
    pub fn rejection(&self) -> Option<&GameError> {
        match self {
            ClientError::Rejected(e) => Some(e),
            ClientError::Connectivity(_) => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Connectivity(e) => write!(f, "cannot reach server: {}", e),
            ClientError::Rejected(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<anyhow::Error> for ClientError {
    fn from(e: anyhow::Error) -> Self {
        ClientError::Connectivity(e)
    }
}

fn malformed(what: &str, got: &Response) -> ClientError {
    ClientError::Connectivity(anyhow::anyhow!("malformed response to {}: {:?}", what, got))
}

/// Issues requests over a [`Transport`], handshaking on first use.
pub struct Stub<T: Transport> {
    transport: T,
    seq: u64,
    handshaken: bool,
}

impl Stub<TcpTransport> {
    /// Connect to a server; `timeout` bounds the connect and every request.
    pub async fn connect<A: ToSocketAddrs>(addr: A, timeout: Duration) -> Result<Self, ClientError> {
        let transport = TcpTransport::connect(addr, timeout).await?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            seq: 0,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> Result<(), ClientError> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Handshake {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::HandshakeAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::HandshakeAck { version } => Err(ClientError::Connectivity(anyhow::anyhow!(
                "Protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            ))),
            other => Err(ClientError::Connectivity(anyhow::anyhow!(
                "Expected HandshakeAck, got {:?}",
                other
            ))),
        }
    }

    /// Send one request and wait for its response.
    pub async fn call(&mut self, body: Request) -> Result<Response, ClientError> {
        self.ensure_handshake().await?;
        let seq = self.seq;
        self.seq += 1;
        self.transport.send(Message::Request { seq, body }).await?;
        match self.transport.recv().await? {
            Message::Response { seq: got, body } if got == seq => match body {
                Response::Error(payload) => Err(ClientError::Rejected(payload.error)),
                body => Ok(body),
            },
            Message::Response { seq: got, .. } => Err(ClientError::Connectivity(anyhow::anyhow!(
                "Sequence mismatch: expected {}, got {}",
                seq,
                got
            ))),
            other => Err(ClientError::Connectivity(anyhow::anyhow!(
                "Expected Response, got {:?}",
                other
            ))),
        }
    }

    pub async fn place_ships<S: AsRef<str>>(
        &mut self,
        player: &str,
        ships: &[S],
    ) -> Result<Placement, ClientError> {
        let req = Request::PlaceShips {
            player: player.to_string(),
            ships: ships.iter().map(|s| s.as_ref().to_string()).collect(),
        };
        match self.call(req).await? {
            Response::Placed(p) => Ok(p),
            other => Err(malformed("place ships", &other)),
        }
    }

    pub async fn fire(&mut self, player: &str, target: &str) -> Result<FireReport, ClientError> {
        let req = Request::Fire {
            player: player.to_string(),
            target: target.to_string(),
        };
        match self.call(req).await? {
            Response::Fired(report) => Ok(report),
            other => Err(malformed("fire", &other)),
        }
    }

    pub async fn status(&mut self) -> Result<Snapshot, ClientError> {
        match self.call(Request::Status).await? {
            Response::Status(snapshot) => Ok(snapshot),
            other => Err(malformed("status", &other)),
        }
    }

    pub async fn restart(&mut self) -> Result<String, ClientError> {
        match self.call(Request::Restart).await? {
            Response::Ack { status } => Ok(status),
            other => Err(malformed("restart", &other)),
        }
    }

    pub async fn reset_ready(&mut self, player: &str) -> Result<String, ClientError> {
        let req = Request::ResetReady {
            player: player.to_string(),
        };
        match self.call(req).await? {
            Response::Ack { status } => Ok(status),
            other => Err(malformed("reset ready", &other)),
        }
    }
}
