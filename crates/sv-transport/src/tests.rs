//! Unit and loopback tests for sv-transport.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::{END_OF_MESSAGE, Endpoint, TransportConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read one sentinel-terminated message, terminator stripped.
/// Returns `None` if the peer closed first.
fn read_message(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut msg = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) => return None,
            Ok(_) if byte[0] == END_OF_MESSAGE => return Some(msg),
            Ok(_) => msg.push(byte[0]),
        }
    }
}

/// Accept one connection and hand it to `serve`; the thread returns whatever
/// `serve` returns so tests can assert on what the server saw.
fn serve_once<T, F>(serve: F) -> (Endpoint, JoinHandle<T>)
where
    T: Send + 'static,
    F: FnOnce(TcpStream) -> T + Send + 'static,
{
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve(stream)
    });
    (Endpoint::new("127.0.0.1", port), handle)
}

fn fast_config() -> TransportConfig {
    TransportConfig::with_timeout(Duration::from_millis(300))
}

// ── Framing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod framing {
    use crate::{END_OF_MESSAGE, Framing, SentinelFraming, TransportError};

    #[test]
    fn encode_appends_terminator() {
        let mut out = Vec::new();
        SentinelFraming.encode(b"start", &mut out).unwrap();
        assert_eq!(out, b"start\x04");
    }

    #[test]
    fn encode_keeps_existing_terminator() {
        let mut out = Vec::new();
        SentinelFraming.encode(b"out\x04", &mut out).unwrap();
        assert_eq!(out, b"out\x04");
    }

    #[test]
    fn encode_rejects_embedded_terminator() {
        let mut out = Vec::new();
        let err = SentinelFraming.encode(b"send\x04_data", &mut out).unwrap_err();
        assert!(matches!(err, TransportError::SentinelInPayload { offset: 4 }));
        assert!(out.is_empty());
    }

    #[test]
    fn completeness_and_strip() {
        assert!(!SentinelFraming.is_complete(b""));
        assert!(!SentinelFraming.is_complete(b"no data"));
        assert!(SentinelFraming.is_complete(&[b'x', END_OF_MESSAGE]));
        assert_eq!(SentinelFraming.strip(b"no data\x04"), b"no data");
        assert_eq!(SentinelFraming.strip(b"partial"), b"partial");
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod command {
    use sv_core::FrameIndex;

    use crate::Command;

    #[test]
    fn payloads() {
        assert_eq!(Command::Start.payload(), b"start");
        assert_eq!(Command::Stop.payload(), b"out");
        assert_eq!(Command::SendData { after: FrameIndex(12) }.payload(), b"send_data 12");
    }

    #[test]
    fn parse_round_trips_each_command() {
        for cmd in [Command::Start, Command::Stop, Command::SendData { after: FrameIndex(3) }] {
            assert_eq!(Command::parse(&cmd.payload()), Some(cmd));
        }
    }

    #[test]
    fn parse_ignores_unknown_and_incomplete() {
        assert_eq!(Command::parse(b"hello"), None);
        assert_eq!(Command::parse(b"send_data"), None);
        assert_eq!(Command::parse(b"send_data x"), None);
        assert_eq!(Command::parse(b""), None);
    }

    #[test]
    fn only_send_data_expects_reply() {
        assert!(Command::SendData { after: FrameIndex(0) }.expects_reply());
        assert!(!Command::Start.expects_reply());
        assert!(!Command::Stop.expects_reply());
    }
}

// ── TCP ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tcp {
    use super::*;
    use crate::{CLOSE_NOTICE, FailureKind, IoOp, TcpTransport, Transport, TransportError};

    #[test]
    fn single_shot_request_round_trip() {
        let (endpoint, server) = serve_once(|mut stream| {
            let request = read_message(&mut stream).unwrap();
            stream.write_all(b"kod_obce,pocet_obyvatel,pocet_nakazenych,datum\n001,1000,5,0\n\x04").unwrap();
            let notice = read_message(&mut stream);
            (request, notice)
        });

        let transport = TcpTransport::new(endpoint, fast_config());
        let reply = transport.request(b"send_data 0").unwrap();
        assert_eq!(reply.last(), Some(&END_OF_MESSAGE), "terminator is left for the caller");
        assert!(reply.starts_with(b"kod_obce"));

        let (request, notice) = server.join().unwrap();
        assert_eq!(request, b"send_data 0");
        assert_eq!(notice.as_deref(), Some(CLOSE_NOTICE));
    }

    #[test]
    fn reply_split_across_writes_is_reassembled() {
        let (endpoint, server) = serve_once(|mut stream| {
            read_message(&mut stream).unwrap();
            stream.write_all(b"header\n").unwrap();
            stream.flush().unwrap();
            thread::sleep(Duration::from_millis(30));
            stream.write_all(b"001,1000,5,0\n\x04").unwrap();
        });

        let transport = TcpTransport::new(endpoint, fast_config());
        let reply = transport.request(b"send_data 0").unwrap();
        assert_eq!(reply, b"header\n001,1000,5,0\n\x04");
        server.join().unwrap();
    }

    #[test]
    fn notify_sends_without_reading() {
        let (endpoint, server) = serve_once(|mut stream| {
            let first = read_message(&mut stream);
            let second = read_message(&mut stream);
            (first, second)
        });

        TcpTransport::new(endpoint, fast_config()).notify(b"start").unwrap();

        let (first, second) = server.join().unwrap();
        assert_eq!(first.as_deref(), Some(&b"start"[..]));
        assert_eq!(second.as_deref(), Some(CLOSE_NOTICE));
    }

    #[test]
    fn bound_connection_serves_several_requests() {
        let (endpoint, server) = serve_once(|mut stream| {
            let mut seen = Vec::new();
            for reply in [&b"no data\x04"[..], &b"h\n001,1,1,0\n\x04"[..]] {
                seen.push(read_message(&mut stream).unwrap());
                stream.write_all(reply).unwrap();
            }
            seen
        });

        let transport = TcpTransport::new(endpoint, fast_config());
        let mut conn = transport.connect().unwrap();
        assert_eq!(conn.request(b"send_data 0").unwrap(), b"no data\x04");
        assert_eq!(conn.request(b"send_data 0").unwrap(), b"h\n001,1,1,0\n\x04");
        conn.close();

        let seen = server.join().unwrap();
        assert_eq!(seen, vec![b"send_data 0".to_vec(), b"send_data 0".to_vec()]);
    }

    #[test]
    fn refused_connection_is_a_connect_failure() {
        let port = {
            let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = TcpTransport::new(Endpoint::new("127.0.0.1", port), fast_config());
        let err = transport.request(b"send_data 0").unwrap_err();
        assert!(matches!(err, TransportError::Refused { .. }), "got {err:?}");
        assert_eq!(err.kind(), FailureKind::Connect);
    }

    #[test]
    fn silent_server_times_out_on_read() {
        let (endpoint, server) = serve_once(|mut stream| {
            read_message(&mut stream);
            // Hold the socket open without answering until the client gives up.
            read_message(&mut stream);
        });

        let transport = TcpTransport::new(endpoint, fast_config());
        let err = transport.request(b"send_data 0").unwrap_err();
        assert!(matches!(err, TransportError::Timeout { op: IoOp::Read }), "got {err:?}");
        assert_eq!(err.kind(), FailureKind::Io);
        server.join().unwrap();
    }

    #[test]
    fn peer_closing_mid_message_is_reported() {
        let (endpoint, server) = serve_once(|mut stream| {
            read_message(&mut stream);
            stream.write_all(b"header\n001,").unwrap();
        });

        let transport = TcpTransport::new(endpoint, fast_config());
        let err = transport.request(b"send_data 0").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, TransportError::Closed { received: 11 }), "got {err:?}");
    }

    #[test]
    fn oversized_reply_is_abandoned() {
        let (endpoint, server) = serve_once(|mut stream| {
            read_message(&mut stream);
            let _ = stream.write_all(&[b'x'; 4096]);
        });

        let config = TransportConfig { max_message_bytes: 1024, ..fast_config() };
        let err = TcpTransport::new(endpoint, config).request(b"send_data 0").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, TransportError::TooLarge { limit: 1024 }), "got {err:?}");
    }

    #[test]
    fn payload_with_terminator_is_rejected_before_writing() {
        let (endpoint, server) = serve_once(|mut stream| read_message(&mut stream));

        let transport = TcpTransport::new(endpoint, fast_config());
        let err = transport.notify(b"st\x04art").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Payload);
        // Only the close notice reaches the server.
        assert_eq!(server.join().unwrap().as_deref(), Some(CLOSE_NOTICE));
    }
}
