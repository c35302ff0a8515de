use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// How the fake relay answers an AUTH command.
#[derive(Debug, Clone, Copy)]
pub enum AuthBehaviour {
    Accept,
    Reject,
}

/// Everything the relay saw, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RelayLog {
    pub connections: usize,
    pub credentials: Vec<(String, String)>,
    pub mail_from: Vec<String>,
    pub rcpt_to: Vec<String>,
    pub messages: Vec<String>,
}

/// A minimal plaintext ESMTP server: enough of the protocol for one
/// authenticated transaction per connection.
pub struct FakeSmtpServer {
    port: u16,
    log: Arc<Mutex<RelayLog>>,
    handle: JoinHandle<()>,
}

impl FakeSmtpServer {
    pub async fn start(auth: AuthBehaviour) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake SMTP server");
        let port = listener.local_addr().unwrap().port();
        let log = Arc::new(Mutex::new(RelayLog::default()));

        let session_log = Arc::clone(&log);
        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                session_log.lock().unwrap().connections += 1;
                let log = Arc::clone(&session_log);
                tokio::spawn(async move {
                    let _ = handle_session(socket, log, auth).await;
                });
            }
        });

        Self { port, log, handle }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn log(&self) -> RelayLog {
        self.log.lock().unwrap().clone()
    }
}

impl Drop for FakeSmtpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_session(
    socket: TcpStream,
    log: Arc<Mutex<RelayLog>>,
    auth: AuthBehaviour,
) -> std::io::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer.write_all(b"220 fake.relay ESMTP ready\r\n").await?;
    while let Some(line) = lines.next_line().await? {
        let command = line.to_ascii_uppercase();
        if command.starts_with("EHLO") || command.starts_with("HELO") {
            writer
                .write_all(b"250-fake.relay\r\n250-AUTH PLAIN LOGIN\r\n250 8BITMIME\r\n")
                .await?;
        } else if command.starts_with("AUTH PLAIN ") {
            let decoded = base64::decode(line["AUTH PLAIN ".len()..].trim()).unwrap_or_default();
            let decoded = String::from_utf8_lossy(&decoded).to_string();
            let mut parts = decoded.split('\0').skip(1);
            let username = parts.next().unwrap_or_default().to_string();
            let password = parts.next().unwrap_or_default().to_string();
            log.lock().unwrap().credentials.push((username, password));
            match auth {
                AuthBehaviour::Accept => {
                    writer
                        .write_all(b"235 2.7.0 Authentication successful\r\n")
                        .await?
                }
                AuthBehaviour::Reject => {
                    writer
                        .write_all(b"535 5.7.8 Authentication credentials invalid\r\n")
                        .await?
                }
            }
        } else if command.starts_with("MAIL FROM:") {
            log.lock().unwrap().mail_from.push(address_of(&line));
            writer.write_all(b"250 2.1.0 OK\r\n").await?;
        } else if command.starts_with("RCPT TO:") {
            log.lock().unwrap().rcpt_to.push(address_of(&line));
            writer.write_all(b"250 2.1.5 OK\r\n").await?;
        } else if command == "DATA" {
            writer
                .write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")
                .await?;
            let mut message = Vec::new();
            while let Some(data_line) = lines.next_line().await? {
                if data_line == "." {
                    break;
                }
                message.push(data_line);
            }
            log.lock().unwrap().messages.push(message.join("\n"));
            writer.write_all(b"250 2.0.0 Queued\r\n").await?;
        } else if command == "QUIT" {
            writer.write_all(b"221 2.0.0 Bye\r\n").await?;
            break;
        } else if command == "RSET" || command == "NOOP" {
            writer.write_all(b"250 2.0.0 OK\r\n").await?;
        } else {
            writer
                .write_all(b"502 5.5.2 Command not recognized\r\n")
                .await?;
        }
    }
    Ok(())
}

fn address_of(line: &str) -> String {
    line.split('<')
        .nth(1)
        .and_then(|rest| rest.split('>').next())
        .unwrap_or_default()
        .to_string()
}
