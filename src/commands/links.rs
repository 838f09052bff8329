use clap::Subcommand;
use doclink::link::{LinkDirection, LinkManager, LinkedDocument, UndoHandle};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{write_json, CommandError};

#[derive(Subcommand, Debug)]
pub enum LinksCommand {
    /// List parents or children of the current document
    List {
        /// parents or children
        direction: LinkDirection,

        /// Include links of linked documents
        #[arg(long)]
        recursive: bool,
    },
    /// Link a document by its web URL
    Add {
        direction: LinkDirection,
        url: String,
    },
    /// Unlink a document by its web URL
    Remove {
        direction: LinkDirection,
        url: String,

        /// Wait for Enter on stdin to undo, until the undo window closes
        #[arg(long)]
        undoable: bool,
    },
}

impl LinksCommand {
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::List { .. } => "list_links",
            Self::Add { .. } => "add_link",
            Self::Remove { .. } => "remove_link",
        }
    }
}

pub async fn run(
    command: LinksCommand,
    manager: &LinkManager,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    match command {
        LinksCommand::List {
            direction,
            recursive,
        } => {
            let documents = manager.fetch_links(direction, recursive, cancel).await?;
            write_json(&documents)
        }
        LinksCommand::Add { direction, url } => {
            let document = manager.add_link_from_url(direction, &url, cancel).await?;
            write_json(&json!({
                "message": format!("Successfully linked {}.", document.display_name()),
                "document": document,
            }))
        }
        LinksCommand::Remove {
            direction,
            url,
            undoable,
        } => {
            let removal = manager.remove_link_from_url(direction, &url, cancel).await?;
            write_json(&json!({
                "message": format!("Successfully deleted {}.", removal.removed.display_name()),
                "document": removal.removed,
                "undoWindow": humantime::format_duration(removal.undo.remaining()).to_string(),
            }))?;
            if undoable {
                offer_undo(manager, removal.undo, cancel).await?;
            }
            Ok(())
        }
    }
}

/// Waits for a line on stdin while the undo window is open and restores the
/// link if one arrives.
async fn offer_undo(
    manager: &LinkManager,
    handle: UndoHandle,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let confirmed = tokio::select! {
        () = cancel.cancelled() => false,
        line = tokio::time::timeout(handle.remaining(), lines.next_line()) => {
            matches!(line, Ok(Ok(Some(_))))
        }
    };
    if !confirmed {
        info!("Undo window closed");
        return Ok(());
    }
    let restored: Option<LinkedDocument> = manager.undo(handle, cancel).await?;
    match restored {
        Some(document) => write_json(&json!({
            "message": format!("Successfully restored {}.", document.display_name()),
            "document": document,
        })),
        None => write_json(&json!({ "message": "Undo window has passed." })),
    }
}
