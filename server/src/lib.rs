//! # Word Duel Server Library
//!
//! This library provides the authoritative server for a two-player word-search
//! game. Players connect over WebSocket, one creates a game and shares its id,
//! the other joins, and they take turns claiming words that can be traced on a
//! shared letter grid.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Game State
//! Boards, found-word ledgers, turns and scores exist only on the server.
//! Clients send requests and render the events they get back; nothing a client
//! sends is trusted without validation.
//!
//! ### Session Management
//! Handles the lifecycle of client connections:
//! - Session id assignment at connect time
//! - Tracking which game each session is seated in
//! - Teardown and notification on disconnect
//!
//! ### Event Delivery
//! Every accepted action produces events for one or both players. Events are
//! queued per session and written to the socket by a dedicated task.
//!
//! ## Architecture Design
//!
//! ### One Task per Connection
//! Each connection is served by its own task, so messages from one client are
//! handled in order while different clients run in parallel on the tokio
//! runtime.
//!
//! ### Per-Game Locking
//! The registry is a sharded concurrent map and every game sits behind its own
//! mutex. Two submissions to the same game serialize; two different games never
//! wait on each other. Events are sent only after the game lock is released.
//!
//! ### Explicit Ownership
//! There is no global state. `main` loads the dictionary, builds one
//! [`service::GameService`] and hands it to the [`network::Server`].
//!
//! ## Module Organization
//!
//! ### Dictionary Module (`dictionary`)
//! Word list loaded once at startup and shared read-only.
//!
//! ### Board Module (`board`)
//! Grid generation from dictionary words and path search for submitted words.
//!
//! ### Game Module (`game`)
//! Two-player turn state machine with the found-word ledger and scoring.
//!
//! ### Registry Module (`registry`)
//! Concurrent store of live games keyed by UUID.
//!
//! ### Session Manager Module (`session_manager`)
//! Connected sessions, their outbound queues and game bindings.
//!
//! ### Service Module (`service`)
//! Turns inbound requests into engine calls and outbound events.
//!
//! ### Network Module (`network`)
//! WebSocket accept loop and per-connection reader/writer tasks.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::dictionary::Dictionary;
//! use server::network::Server;
//! use server::service::GameService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let dictionary = Arc::new(Dictionary::bundled());
//!     let service = Arc::new(GameService::new(dictionary, &config));
//!
//!     let server = Server::bind(&config.address(), service).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod network;
pub mod player;
pub mod registry;
pub mod service;
pub mod session_manager;
