use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

use stroke_sync::error::ProcessingError;
use stroke_sync::processing::{AlignmentJob, ProcessingClient};

/// Spawn a one-shot HTTP stub that answers with the given status and
/// body, shipping the raw request back for inspection.
fn spawn_stub_server(
    status_line: &'static str,
    body: &'static str,
) -> (String, mpsc::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            handle_client(stream, status_line, body, request_tx);
        }
    });

    (format!("http://{}", addr), request_rx)
}

fn handle_client(
    mut stream: TcpStream,
    status_line: &str,
    body: &str,
    request_tx: mpsc::Sender<Vec<u8>>,
) {
    let mut request = Vec::new();
    let mut buffer = [0u8; 4096];

    // Read until the full body (per Content-Length) has arrived
    loop {
        match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                request.extend_from_slice(&buffer[..n]);
                if let Some(total) = expected_total(&request) {
                    if request.len() >= total {
                        break;
                    }
                }
            }
            Err(_) => break,
        }
    }

    let _ = request_tx.send(request);

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn expected_total(request: &[u8]) -> Option<usize> {
    let headers_end = request.windows(4).position(|w| w == b"\r\n\r\n")? + 4;
    let headers = String::from_utf8_lossy(&request[..headers_end]);
    let content_length = headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    })?;
    Some(headers_end + content_length)
}

fn write_fake_clip(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let clip = dir.path().join("swing.mp4");
    std::fs::write(&clip, b"not really video bytes").unwrap();
    clip
}

#[tokio::test]
async fn submit_posts_multipart_and_parses_receipt() {
    let (endpoint, request_rx) = spawn_stub_server(
        "200 OK",
        r#"{"message":"ffmpeg command executed successfully","outputFilePath":"/jobs/abc/output.mp4"}"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let clip = write_fake_clip(&dir);

    let client = ProcessingClient::new(&endpoint).unwrap();
    let job = AlignmentJob::new(&clip, 2.3333);
    let receipt = client.submit(&job).await.unwrap();

    assert_eq!(receipt.output_file_path, "/jobs/abc/output.mp4");

    // The wire shape the backend expects: multipart POST with the
    // timestamp at two decimals, the clip bytes, and the job id
    let request = request_rx.recv().unwrap();
    let request_text = String::from_utf8_lossy(&request);
    assert!(request_text.starts_with("POST"));
    assert!(request_text.contains("name=\"timestamp\""));
    assert!(request_text.contains("2.33"));
    assert!(request_text.contains("name=\"video\""));
    assert!(request_text.contains("filename=\"swing.mp4\""));
    assert!(request_text.contains("name=\"job\""));
    assert!(request_text.contains(&job.id.to_string()));
    assert!(request_text.contains("not really video bytes"));
}

#[tokio::test]
async fn submit_reports_backend_rejection() {
    let (endpoint, _request_rx) = spawn_stub_server(
        "500 Internal Server Error",
        r#"{"error":"Error running ffmpeg command"}"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let clip = write_fake_clip(&dir);

    let client = ProcessingClient::new(&endpoint).unwrap();
    let job = AlignmentJob::new(&clip, 1.0);
    let err = client.submit(&job).await.unwrap_err();

    match err {
        ProcessingError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("ffmpeg"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn submit_fails_cleanly_on_missing_clip() {
    let client = ProcessingClient::new("http://127.0.0.1:9/api/process").unwrap();
    let job = AlignmentJob::new("/nonexistent/clip.mp4", 1.0);

    let err = client.submit(&job).await.unwrap_err();
    assert!(matches!(err, ProcessingError::PayloadRead { .. }));
}
