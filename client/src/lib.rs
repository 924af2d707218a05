//! # Word Duel Client Library
//!
//! Terminal client for the word duel server. It opens a WebSocket to the
//! server, turns typed commands into protocol requests and prints the events
//! that come back.
//!
//! ## Architecture Overview
//!
//! The server owns all game state. The client keeps a small mirror of it,
//! rebuilt purely from events, so it can show the board, both scores and whose
//! turn it is. Nothing is predicted locally: a word only counts once the server
//! broadcasts it.
//!
//! ## Module Organization
//!
//! ### Commands Module (`commands`)
//! Parses lines like `create 5 Ana` or `word cat` into requests.
//!
//! ### Game Module (`game`)
//! The event-driven mirror of the current game.
//!
//! ### Network Module (`network`)
//! WebSocket connection and the stdin/socket event loop.
//!
//! ### Rendering Module (`rendering`)
//! Text output for the board, scores and events.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("ws://127.0.0.1:8080").await?;
//!     client.run().await
//! }
//! ```

pub mod commands;
pub mod game;
pub mod network;
pub mod rendering;
