//! Bounded, classified TCP connection attempts.
//!
//! One attempt is one fresh socket. The first poll is taken by hand so
//! a handshake that completes without suspending is distinguishable
//! from one that needed the wait phase; everything else goes through a
//! hard deadline. The stream is dropped on every path, so the socket
//! never outlives the attempt.

use std::future::{Future, poll_fn};
use std::io;
use std::net::SocketAddr;
use std::task::Poll;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{Instant, timeout};

/// How a single connection attempt ended.
#[derive(Debug)]
pub enum ConnectOutcome {
    /// Handshake completed on the first poll, before any waiting.
    Immediate { latency: Duration },
    /// Handshake completed somewhere within the allowed wait.
    AfterWait { latency: Duration },
    /// The OS delivered a verdict (refused, unreachable, ...).
    Failed { error: io::Error, latency: Duration },
    /// No verdict within the allowed wait.
    TimedOut { limit: Duration },
}

impl ConnectOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(
            self,
            ConnectOutcome::Immediate { .. } | ConnectOutcome::AfterWait { .. }
        )
    }

    pub fn is_failure(&self) -> bool {
        !self.is_connected()
    }
}

/// Attempts a TCP connection to `addr`, waiting at most `limit`.
pub async fn connect_with_timeout(addr: SocketAddr, limit: Duration) -> ConnectOutcome {
    let started: Instant = Instant::now();

    let attempt = TcpStream::connect(addr);
    tokio::pin!(attempt);

    let first: Poll<io::Result<TcpStream>> =
        poll_fn(|cx| Poll::Ready(attempt.as_mut().poll(cx))).await;

    match first {
        Poll::Ready(Ok(_stream)) => {
            return ConnectOutcome::Immediate {
                latency: started.elapsed(),
            };
        }
        Poll::Ready(Err(error)) => {
            return ConnectOutcome::Failed {
                error,
                latency: started.elapsed(),
            };
        }
        Poll::Pending => {}
    }

    match timeout(limit, attempt).await {
        Ok(Ok(_stream)) => ConnectOutcome::AfterWait {
            latency: started.elapsed(),
        },
        Ok(Err(error)) => ConnectOutcome::Failed {
            error,
            latency: started.elapsed(),
        },
        Err(_elapsed) => ConnectOutcome::TimedOut { limit },
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connect_succeeds_against_live_listener() {
        let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let outcome: ConnectOutcome = connect_with_timeout(addr, Duration::from_secs(1)).await;
        assert!(outcome.is_connected(), "expected success, got {:?}", outcome);
        assert!(!outcome.is_failure());
    }

    #[tokio::test]
    async fn connect_fails_against_closed_port_with_os_error() {
        // bind-then-drop to get a port with nothing listening
        let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        drop(listener);

        let outcome: ConnectOutcome = connect_with_timeout(addr, Duration::from_secs(1)).await;
        match outcome {
            ConnectOutcome::Failed { error, latency } => {
                assert!(error.raw_os_error().is_some(), "no os code in {:?}", error);
                assert!(latency < Duration::from_secs(1));
            }
            other => panic!("expected refusal, got {:?}", other),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn connect_times_out_on_blackhole_ip() {
        let addr: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1)), 443);
        let limit: Duration = Duration::from_millis(250);

        let outcome: ConnectOutcome = connect_with_timeout(addr, limit).await;
        assert!(
            matches!(outcome, ConnectOutcome::TimedOut { limit: l } if l == limit),
            "expected timeout, got {:?}",
            outcome
        );
    }
}
