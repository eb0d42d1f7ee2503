use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock backend answers to every request.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// `200 OK` with a chunked body, one HTTP chunk per element, `delay`
    /// apart. With `hang` set the body is never terminated.
    Chunked {
        chunks: Vec<Vec<u8>>,
        delay: Duration,
        hang: bool,
    },
    Status(u16),
    /// `302 Found` to `location`.
    Redirect(String),
}

impl MockResponse {
    pub fn chunked<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        MockResponse::Chunked {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            delay: Duration::from_millis(20),
            hang: false,
        }
    }

    pub fn hanging<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        MockResponse::Chunked {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            delay: Duration::from_millis(20),
            hang: true,
        }
    }
}

/// A raw HTTP/1.1 backend on an ephemeral port.
pub struct MockLogServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockLogServer {
    pub async fn start(response: MockResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock log server");
        let addr = listener.local_addr().expect("mock server has no address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let response = response.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, response, seen).await;
                });
            }
        });

        MockLogServer {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Request targets (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(
    mut stream: TcpStream,
    response: MockResponse,
    seen: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let head = read_head(&mut stream).await?;
    if let Some(target) = head.lines().next().and_then(|l| l.split(' ').nth(1)) {
        seen.lock().unwrap().push(target.to_string());
    }

    match response {
        MockResponse::Status(code) => {
            let head =
                format!("HTTP/1.1 {code} Mock\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            stream.write_all(head.as_bytes()).await?;
        }
        MockResponse::Redirect(location) => {
            let head = format!(
                "HTTP/1.1 302 Found\r\nLocation: {location}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            );
            stream.write_all(head.as_bytes()).await?;
        }
        MockResponse::Chunked {
            chunks,
            delay,
            hang,
        } => {
            stream
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: text/plain; charset=utf-8\r\n\
                      Transfer-Encoding: chunked\r\n\
                      Connection: close\r\n\r\n",
                )
                .await?;

            for chunk in chunks {
                stream
                    .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
                    .await?;
                stream.write_all(&chunk).await?;
                stream.write_all(b"\r\n").await?;
                stream.flush().await?;
                tokio::time::sleep(delay).await;
            }

            if hang {
                std::future::pending::<()>().await;
            }
            stream.write_all(b"0\r\n\r\n").await?;
        }
    }

    stream.flush().await?;
    stream.shutdown().await
}

async fn read_head(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
