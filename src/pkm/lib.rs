//! # Pkm Architecture
//!
//! Pkm is a **personal knowledge and task capture library** for students: quick notes and
//! tasks land in an inbox, get organized into courses and topics later, and tasks carry
//! due dates, priorities and subtasks. The `pkm` binary is one client of this library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Applies configuration (default priority, week window)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Shapes service results for display, emits CmdMessages    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (services/)                                  │
//! │  - NoteService, TaskService: load, mutate, save             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait over one JSON document               │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments and returns regular Rust
//! types. It never writes to stdout/stderr and never calls `std::process::exit`.
//! Time and id generation come in through the [`clock::Clock`] and
//! [`ids::IdGenerator`] traits so every layer can be tested deterministically.
//!
//! ## Testing Strategy
//!
//! 1. **Services** (`services/*.rs`): the bulk of the behavior tests, against
//!    `InMemoryStore` with a fixed clock and sequential ids.
//! 2. **Commands** (`commands/*.rs`): ordering, counts and message text.
//! 3. **API** (`api.rs`): dispatch and configuration defaults.
//! 4. **End to end** (`tests/`): the real JSON file store and the `pkm` binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Per-command result shaping
//! - [`services`]: Note and task operations
//! - [`store`]: Storage abstraction and implementations
//! - [`schema`]: On-disk document format and record conversions
//! - [`model`]: Core data types (`Note`, `Task`, `Placement`, `Priority`)
//! - [`dates`]: Due-date parsing and relative labels
//! - [`ids`]: Identifier generation
//! - [`clock`]: Time source
//! - [`config`]: Configuration management and data directory resolution
//! - [`logging`]: Logger bootstrap for the binary
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod ids;
pub mod logging;
pub mod model;
pub mod schema;
pub mod services;
pub mod store;
