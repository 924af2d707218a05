use crate::commands::{parse_command, Command, HELP};
use crate::game::ClientGameState;
use crate::rendering::describe_event;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use shared::{ClientRequest, ServerEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Terminal client: reads commands from stdin and prints server events
pub struct Client {
    socket: Socket,
    state: ClientGameState,
}

impl Client {
    pub async fn connect(url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to {}...", url);
        let (socket, _) = connect_async(url).await?;
        info!("Connected");

        Ok(Client {
            socket,
            state: ClientGameState::new(),
        })
    }

    pub fn state(&self) -> &ClientGameState {
        &self.state
    }

    pub async fn send(&mut self, request: &ClientRequest) -> Result<(), Box<dyn std::error::Error>> {
        let text = request.to_json()?;
        debug!("-> {}", text);
        self.socket.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Waits for the next server event, skipping frames that are not events.
    /// Returns `None` once the connection is closed.
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        while let Some(frame) = self.socket.next().await {
            match frame {
                Ok(Message::Text(text)) => match ServerEvent::from_json(&text) {
                    Ok(event) => {
                        self.state.apply(&event);
                        return Some(event);
                    }
                    Err(e) => warn!("Unreadable event {:?}: {}", text, e),
                },
                Ok(Message::Close(_)) => return None,
                Ok(_) => {}
                Err(e) => {
                    error!("Connection error: {}", e);
                    return None;
                }
            }
        }
        None
    }

    pub async fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", HELP);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match parse_command(&line) {
                        Ok(Some(Command::Send(request))) => self.send(&request).await?,
                        Ok(Some(Command::Help)) => println!("{}", HELP),
                        Ok(Some(Command::Quit)) => break,
                        Ok(None) => {}
                        Err(e) => println!("{}", e),
                    }
                },

                event = self.next_event() => {
                    let Some(event) = event else {
                        println!("Server closed the connection");
                        return Ok(());
                    };
                    println!("{}", describe_event(&event, &self.state));
                },
            }
        }

        let _ = self.socket.close(None).await;
        Ok(())
    }
}
