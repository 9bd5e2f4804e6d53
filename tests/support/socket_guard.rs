//! Guard for tests that need a localhost socket.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

/// True when `SOUNDGRAB_REQUIRE_SOCKET_TESTS` asks for socket tests to fail instead of skip.
#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var("SOUNDGRAB_REQUIRE_SOCKET_TESTS")
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Checks whether localhost can be bound, logging the caller's location when it cannot.
///
/// Panics instead of skipping when [`socket_tests_required`] is set.
#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}; wiremock-based test cannot run in this environment",
        location.file(),
        location.line()
    );
    if socket_tests_required() {
        panic!("{message}. Set SOUNDGRAB_REQUIRE_SOCKET_TESTS=0 to allow local skip behavior.");
    }

    eprintln!(
        "{message}. Skipping test. Set SOUNDGRAB_REQUIRE_SOCKET_TESTS=1 to fail-fast instead."
    );
    true
}

/// Starts a wiremock server, or returns `None` when socket-bound tests are skipped.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}

/// Returns an origin on localhost where nothing is listening.
pub fn closed_local_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
