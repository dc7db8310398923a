//! Async UDP socket wrapper for LOCKSTEP transport.
//!
//! Provides a high-level interface for sending and receiving frames over
//! UDP, with buffer sizing appropriate for the fixed frame format.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use crate::core::DatagramLink;
use crate::core::constants::{CONTROL_RECV_BUFFER_SIZE, DATA_RECV_BUFFER_SIZE};

/// Async UDP socket wrapper for LOCKSTEP.
///
/// One socket is owned exclusively by one [`crate::arq::ArqEngine`]
/// instance; there is no locking because there is no concurrent access.
#[derive(Debug)]
pub struct LockstepSocket {
    /// The underlying UDP socket.
    socket: Arc<UdpSocket>,
    /// Receive buffer for the inherent receive methods.
    recv_buffer: Vec<u8>,
}

impl LockstepSocket {
    /// Create a new LOCKSTEP socket bound to the given address.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self::from_socket(socket))
    }

    /// Create a LOCKSTEP socket from an existing UDP socket.
    pub fn from_socket(socket: UdpSocket) -> Self {
        Self {
            socket: Arc::new(socket),
            recv_buffer: vec![0u8; DATA_RECV_BUFFER_SIZE],
        }
    }

    /// Get the local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Connect to a remote address (for client sockets).
    ///
    /// After connecting, [`send`](Self::send) and [`recv`](Self::recv) can
    /// be used instead of the addressed variants.
    pub async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        self.socket.connect(addr).await
    }

    /// Send data to a specific address.
    pub async fn send_to(&self, data: &[u8], addr: SocketAddr) -> io::Result<usize> {
        self.socket.send_to(data, addr).await
    }

    /// Send data to the connected address.
    pub async fn send(&self, data: &[u8]) -> io::Result<usize> {
        self.socket.send(data).await
    }

    /// Receive data into the internal buffer and return the sender's
    /// address.
    pub async fn recv_from(&mut self) -> io::Result<(&[u8], SocketAddr)> {
        let (len, addr) = self.socket.recv_from(&mut self.recv_buffer).await?;
        Ok((&self.recv_buffer[..len], addr))
    }

    /// Receive data from the connected address.
    pub async fn recv(&mut self) -> io::Result<&[u8]> {
        let len = self.socket.recv(&mut self.recv_buffer).await?;
        Ok(&self.recv_buffer[..len])
    }
}

impl DatagramLink for LockstepSocket {
    async fn send_to(&self, data: &[u8], addr: SocketAddr) -> io::Result<usize> {
        self.socket.send_to(data, addr).await
    }

    async fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.recv_from(buf).await
    }
}

/// Builder for creating LOCKSTEP sockets with custom options.
#[derive(Debug, Clone)]
pub struct LockstepSocketBuilder {
    recv_buffer_size: usize,
}

impl Default for LockstepSocketBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LockstepSocketBuilder {
    /// Create a new socket builder with default options.
    pub fn new() -> Self {
        Self {
            recv_buffer_size: DATA_RECV_BUFFER_SIZE,
        }
    }

    /// Set the receive buffer size.
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size;
        self
    }

    /// Size the buffer for control-only traffic (ACK/NAK).
    pub fn control_only(self) -> Self {
        self.recv_buffer_size(CONTROL_RECV_BUFFER_SIZE)
    }

    /// Bind to the given address and create a socket.
    pub async fn bind(self, addr: SocketAddr) -> io::Result<LockstepSocket> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(self.from_socket(socket))
    }

    /// Create a socket from an existing UDP socket.
    pub fn from_socket(self, socket: UdpSocket) -> LockstepSocket {
        LockstepSocket {
            socket: Arc::new(socket),
            recv_buffer: vec![0u8; self.recv_buffer_size],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_socket_bind() {
        let socket = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        assert!(socket.local_addr().unwrap().port() != 0);
    }

    #[tokio::test]
    async fn test_socket_send_recv() {
        let mut server = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let server_addr = server.local_addr().unwrap();

        let client = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();

        let data = b"hello LOCKSTEP";
        client.send_to(data, server_addr).await.unwrap();

        let (received, from) = server.recv_from().await.unwrap();
        assert_eq!(received, data);
        assert_eq!(from, client.local_addr().unwrap());
    }

    #[tokio::test]
    async fn test_socket_connected() {
        let mut server = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let server_addr = server.local_addr().unwrap();

        let client = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let client_addr = client.local_addr().unwrap();
        client.connect(server_addr).await.unwrap();
        server.connect(client_addr).await.unwrap();

        let data = b"connected send";
        client.send(data).await.unwrap();

        let received = server.recv().await.unwrap();
        assert_eq!(received, data);
    }

    #[test]
    fn test_socket_builder() {
        let builder = LockstepSocketBuilder::new().control_only();
        assert_eq!(builder.recv_buffer_size, CONTROL_RECV_BUFFER_SIZE);

        let builder = LockstepSocketBuilder::new().recv_buffer_size(4096);
        assert_eq!(builder.recv_buffer_size, 4096);
    }

    #[tokio::test]
    async fn test_datagram_link_impl() {
        let mut server = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let server_addr = server.local_addr().unwrap();

        let client = LockstepSocket::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();

        DatagramLink::send_to(&client, b"via trait", server_addr)
            .await
            .unwrap();

        let mut buf = [0u8; 64];
        let (len, from) = DatagramLink::recv_from(&mut server, &mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"via trait");
        assert_eq!(from, client.local_addr().unwrap());
    }
}
