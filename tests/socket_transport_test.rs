use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::TcpListener;
use std::thread;

use orogue::protocol::{handshake, LineTransport, SocketTransport, TransportError, WorldSize};

fn serve<F>(script: F) -> (String, thread::JoinHandle<Vec<String>>)
where
    F: FnOnce(&mut dyn Write, &mut dyn FnMut() -> Option<String>) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut writer = stream.try_clone().unwrap();
        let mut reader = BufReader::new(stream);
        let mut received = Vec::new();
        let mut next_line = || {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(line.trim_end().to_string()),
            }
        };
        script(&mut writer, &mut || {
            let line = next_line();
            if let Some(l) = &line {
                received.push(l.clone());
            }
            line
        });
        received
    });
    (addr, handle)
}

#[test]
fn loopback_turn_round_trip() {
    let (addr, server) = serve(|out, recv| {
        out.write_all(b"parameters width=3 height=2\n").unwrap();
        out.write_all(b"action? x=1 y=1 character_index=0 hit_point=4 symbol=h\n").unwrap();
        assert_eq!(recv().as_deref(), Some("south"));
        out.write_all(b"end\n").unwrap();
    });

    let mut transport = SocketTransport::connect(&addr).unwrap();
    assert_eq!(
        handshake(&mut transport).unwrap(),
        WorldSize {
            width: 3,
            height: 2
        }
    );
    assert!(transport.recv_line().unwrap().starts_with("action? "));
    transport.send_line("south").unwrap();
    assert_eq!(transport.recv_line().unwrap(), "end");
    drop(transport);

    assert_eq!(server.join().unwrap(), ["south"]);
}

#[test]
fn dropping_flushes_queued_commands() {
    let (addr, server) = serve(|_out, recv| while recv().is_some() {});

    let mut transport = SocketTransport::connect(&addr).unwrap();
    transport.send_line("west").unwrap();
    transport.send_line("end").unwrap();
    drop(transport);

    assert_eq!(server.join().unwrap(), ["west", "end"]);
}

#[test]
fn undecodable_bytes_report_the_read_error() {
    let (addr, server) = serve(|out, _recv| {
        out.write_all(b"print x=0 y=0 terrain type=\xff\n").unwrap();
    });
    let mut transport = SocketTransport::connect(&addr).unwrap();
    server.join().unwrap();

    match transport.recv_line() {
        Err(TransportError::Io(err)) => assert_eq!(err.kind(), ErrorKind::InvalidData),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    // The reader stops after a failure.
    assert!(matches!(transport.recv_line(), Err(TransportError::Closed)));
}

#[test]
fn server_hang_up_reports_closed() {
    let (addr, server) = serve(|_out, _recv| {});
    let mut transport = SocketTransport::connect(&addr).unwrap();
    server.join().unwrap();

    assert!(matches!(transport.recv_line(), Err(TransportError::Closed)));
    assert!(matches!(transport.try_recv_line(), Err(TransportError::Closed)));
}
