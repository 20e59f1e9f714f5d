//! # pdfword-bot
//!
//! A Telegram bot that turns PDFs into Word documents and Word documents into
//! PDFs by relaying them through the Cloudmersive conversion API.
//!
//! No conversion happens locally. The crate's job is routing: look at the
//! filename extension, pick one of two remote endpoints, upload the bytes, and
//! hand the converted file back to whoever sent it.
//!
//! ## Flow
//!
//! ```text
//! Telegram document
//!  │
//!  ├─ 1. Route     extension → PdfToWord | WordToPdf | unsupported
//!  ├─ 2. Download  file bytes from the Bot API
//!  ├─ 3. Convert   multipart POST to the conversion API (Apikey header)
//!  └─ 4. Reply     converted file + caption, or an explanatory message
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfword_bot::{CloudmersiveClient, ConverterConfig, Dispatcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConverterConfig::builder().api_key("my-api-key").build()?;
//!     let dispatcher = Dispatcher::new(Arc::new(CloudmersiveClient::new(config)?));
//!
//!     let pdf = std::fs::read("report.pdf")?;
//!     let doc = dispatcher.dispatch("report.pdf", &pdf).await?;
//!     std::fs::write(doc.filename, &doc.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `telegram` | on      | The teloxide-based bot in [`telegram`] |
//! | `cli`      | on      | The `pdfword-bot` binary (clap + anyhow + tracing-subscriber + dotenvy) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod route;
#[cfg(feature = "telegram")]
pub mod telegram;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::CloudmersiveClient;
pub use config::{BotConfig, ConverterConfig, ConverterConfigBuilder};
pub use convert::{convert_file, ConvertedFile};
pub use dispatch::{ConvertedDocument, Dispatcher, DocumentConverter};
pub use error::ConvertError;
pub use route::Route;
