//! Deckhand - provision secrets and launch a self-hosted AI stack.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── up            # Full bootstrap: provision + launch
//! │   ├── provision     # File-level provisioning only
//! │   ├── down          # Tear down project containers
//! │   └── completions   # Shell completions
//! ├── core/             # Provisioning components
//! │   ├── env           # .env file parsing and persistence
//! │   ├── secrets       # Random tokens and HS256 key issuance
//! │   ├── harden        # Template/override merge and hardening
//! │   ├── compose       # SearXNG cap_drop toggle in docker-compose.yml
//! │   ├── launch        # docker compose invocation sequence
//! │   ├── repo          # Supabase sparse checkout bootstrap
//! │   └── exec          # Child process runner
//! └── relay/            # n8n webhook relay adapter (library-only)
//!     ├── client        # Request forwarding and reply extraction
//!     └── status        # Rate-limited status event emission
//! ```
//!
//! The `cli` and `core` modules make up the environment provisioner binary.
//! The `relay` module is an independent library unit embedded by a chat
//! host; the two units share nothing but the error type.

pub mod cli;
pub mod core;
pub mod error;
pub mod relay;
