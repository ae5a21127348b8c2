use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::options::ParserOptions;

/// Answers a single request with the given status line, content type and body.
/// Returns the base url to point the api at.
pub async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];

        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buffer).await.unwrap();

            if read == 0 {
                break;
            }

            request.extend_from_slice(&buffer[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    format!("http://{address}")
}

pub fn create_options(base_url: String) -> ParserOptions {
    let mut options = ParserOptions::new("secret");
    options.base_url = base_url;
    options
}
