//! One-shot HTTP server that writes a canned byte response.
//!
//! Covers wire shapes a mock server will not produce, such as latin-1 header
//! octets or a body cut short of its declared length.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::socket_guard::should_skip_socket_bound_test;

/// Serves `response` verbatim to the first connection, then closes it.
///
/// Returns the server origin, or `None` when socket-bound tests are skipped.
pub async fn serve_raw_once(response: Vec<u8>) -> Option<String> {
    if should_skip_socket_bound_test() {
        return None;
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind raw server");
    let origin = format!("http://{}", listener.local_addr().expect("local addr"));

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(&response).await;
        let _ = stream.flush().await;
        let _ = stream.shutdown().await;
    });

    Some(origin)
}
