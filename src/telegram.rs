//! Telegram transport: receive documents, convert them, send them back.
//!
//! The adapter is deliberately thin. Everything it decides on its own (which
//! reply a conversion result turns into) lives in [`reply_for`], a pure
//! function, so it can be tested without a bot token.
//!
//! ```text
//! /start, /help ──▶ static text
//! document ──▶ route check ──▶ size check ──▶ download ──▶ Dispatcher ──▶ reply_for ──▶ send
//! ```

use crate::client::CloudmersiveClient;
use crate::config::BotConfig;
use crate::dispatch::{ConvertedDocument, Dispatcher};
use crate::error::ConvertError;
use crate::route::Route;
use secrecy::ExposeSecret;
use std::sync::Arc;
use teloxide::{
    dispatching::UpdateHandler,
    net::Download,
    payloads::SendDocumentSetters,
    prelude::*,
    types::{ChatAction, Document, InputFile},
    utils::command::BotCommands,
};
use tracing::{debug, info, warn};

type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
type HandlerResult = Result<(), HandlerError>;

/// Reply to `/start`.
pub const WELCOME_MESSAGE: &str = "Welcome! Send me a PDF or Word document to convert.";

/// Largest file the Bot API lets a bot download.
pub const TELEGRAM_DOWNLOAD_LIMIT_BYTES: u64 = 20 * 1024 * 1024;

const GENERIC_FAILURE: &str = "Sorry, the conversion failed. Please try again later.";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "show the welcome message.")]
    Start,
    #[command(description = "explain which files can be converted.")]
    Help,
}

/// What the bot sends back for one inbound document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Document {
        filename: &'static str,
        caption: &'static str,
        bytes: Vec<u8>,
    },
    Text(String),
}

/// Turn a conversion result into the message the sender receives.
pub fn reply_for(result: Result<ConvertedDocument, ConvertError>) -> Reply {
    match result {
        Ok(doc) => Reply::Document {
            filename: doc.filename,
            caption: doc.caption,
            bytes: doc.bytes,
        },
        Err(ConvertError::UnsupportedExtension { extension, .. }) => {
            Reply::Text(unsupported_text(&extension))
        }
        Err(ConvertError::Timeout { .. }) => Reply::Text(
            "The conversion service took too long to answer. Please try again later.".to_string(),
        ),
        Err(_) => Reply::Text(GENERIC_FAILURE.to_string()),
    }
}

fn unsupported_text(extension: &str) -> String {
    if extension.is_empty() {
        "Sorry, I can only convert files ending in .pdf, .doc or .docx.".to_string()
    } else {
        format!(
            "Sorry, I can't convert '.{extension}' files. Send a PDF to get a Word document, \
             or a DOC/DOCX file to get a PDF."
        )
    }
}

/// Text for `/help`.
pub fn help_text() -> String {
    format!(
        "Send me a document and I'll convert it:\n\
         • .pdf → Word ({})\n\
         • .doc / .docx → PDF ({})\n\
         Files must be at most {} MB.\n\n{}",
        Route::PdfToWord.output_filename(),
        Route::WordToPdf.output_filename(),
        TELEGRAM_DOWNLOAD_LIMIT_BYTES / (1024 * 1024),
        Command::descriptions()
    )
}

fn too_large_text(size: u64) -> String {
    format!(
        "That file is too large ({:.1} MB). Telegram only lets bots download files up to {} MB.",
        size as f64 / (1024.0 * 1024.0),
        TELEGRAM_DOWNLOAD_LIMIT_BYTES / (1024 * 1024)
    )
}

/// Reply for a document that must not be downloaded, or `None` when it may.
///
/// The route is checked first, so an oversized file we could not convert
/// anyway is reported as unsupported.
fn rejection_before_download(filename: &str, size: u64) -> Option<String> {
    if Route::from_filename(filename).is_none() {
        return Some(unsupported_text(crate::route::extension(filename)));
    }
    if size > TELEGRAM_DOWNLOAD_LIMIT_BYTES {
        return Some(too_large_text(size));
    }
    None
}

/// Build the teloxide update handler.
pub fn build_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::filter_map(|msg: Message| msg.document().cloned()).endpoint(handle_document))
}

/// Connect to Telegram and process updates until Ctrl-C.
pub async fn run(config: BotConfig) -> Result<(), ConvertError> {
    let client = CloudmersiveClient::new(config.converter)?;
    let dispatcher = Dispatcher::new(Arc::new(client));

    let bot = Bot::new(config.token.expose_secret());
    let me = bot.get_me().await?;
    bot.set_my_commands(Command::bot_commands()).await?;
    info!(
        "Bot @{} is up, waiting for documents",
        me.user.username.as_deref().unwrap_or("<unnamed>")
    );

    teloxide::dispatching::Dispatcher::builder(bot, build_handler())
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|upd| async move {
            debug!("Ignoring update {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling a Telegram update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");
    Ok(())
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> HandlerResult {
    let text = match cmd {
        Command::Start => WELCOME_MESSAGE.to_string(),
        Command::Help => help_text(),
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn handle_document(
    bot: Bot,
    msg: Message,
    doc: Document,
    dispatcher: Dispatcher,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let filename = doc.file_name.clone().unwrap_or_default();
    let size = u64::from(doc.file.size);
    debug!(chat_id = chat_id.0, filename = %filename, size, "document received");

    if let Some(text) = rejection_before_download(&filename, size) {
        debug!(chat_id = chat_id.0, filename = %filename, size, "document rejected before download");
        bot.send_message(chat_id, text).await?;
        return Ok(());
    }

    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::UploadDocument).await {
        debug!("chat action failed: {e}");
    }
    let result = match download_document(&bot, &doc.file.id.to_string()).await {
        Ok(data) => dispatcher.dispatch(&filename, &data).await,
        Err(e) => Err(e),
    };

    // Remote failures were already logged by the dispatcher.
    match result {
        Err(ref e) if e.is_user_error() => debug!(chat_id = chat_id.0, "rejected document: {e}"),
        Err(ref e) if !e.is_remote() => {
            warn!(chat_id = chat_id.0, filename = %filename, "conversion failed: {e}")
        }
        _ => {}
    }

    match reply_for(result) {
        Reply::Document {
            filename,
            caption,
            bytes,
        } => {
            let len = bytes.len();
            bot.send_document(chat_id, InputFile::memory(bytes).file_name(filename))
                .caption(caption)
                .await?;
            info!(chat_id = chat_id.0, filename, bytes = len, "converted document sent");
        }
        Reply::Text(text) => {
            bot.send_message(chat_id, text).await?;
        }
    }
    Ok(())
}

/// Download a file from Telegram by file ID.
async fn download_document(bot: &Bot, file_id: &str) -> Result<Vec<u8>, ConvertError> {
    let file = bot.get_file(file_id).await?;
    let mut data = Vec::new();
    bot.download_file(&file.path, &mut data).await?;
    debug!("downloaded {} bytes from {}", data.len(), file.path);
    Ok(data)
}
