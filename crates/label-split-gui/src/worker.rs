use label_async_runtime::{GuiCommand, GuiUpdate, WorkerChannels};
use tokio::sync::mpsc;

use crate::handlers;
use crate::handlers::source::SourceStore;

/// Async worker task that processes GUI commands one at a time and sends updates
pub async fn worker_task(channels: WorkerChannels) {
    let WorkerChannels {
        commands: mut command_rx,
        updates: update_tx,
    } = channels;

    let mut store = SourceStore::new();
    let mut pending: Option<GuiCommand> = None;

    loop {
        let cmd = match pending.take() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let cmd = coalesce(cmd, &mut command_rx, &mut pending);
        process_command(cmd, &mut store, &update_tx).await;
    }

    log::debug!("Worker stopped");
}

/// Skip queued commands made obsolete by newer ones of the same kind.
///
/// Stops at the first command that does not supersede `cmd`; that command is
/// left in `pending` to run next, so ordering is kept.
fn coalesce(
    mut cmd: GuiCommand,
    command_rx: &mut mpsc::UnboundedReceiver<GuiCommand>,
    pending: &mut Option<GuiCommand>,
) -> GuiCommand {
    while let Ok(next_cmd) = command_rx.try_recv() {
        if cmd.is_superseded_by(&next_cmd) {
            log::debug!("Discarding queued {}, using newer request", command_name(&cmd));
            cmd = next_cmd;
        } else {
            *pending = Some(next_cmd);
            break;
        }
    }
    cmd
}

fn command_name(cmd: &GuiCommand) -> &'static str {
    match cmd {
        GuiCommand::LoadSource { .. } => "load",
        GuiCommand::RenderPreview { .. } => "preview render",
        GuiCommand::CalculateStats { .. } => "statistics",
        GuiCommand::Split { .. } => "split",
        GuiCommand::LoadConfig { .. } => "config load",
        GuiCommand::SaveConfig { .. } => "config save",
        GuiCommand::CloseSource { .. } => "close",
    }
}

async fn process_command(
    cmd: GuiCommand,
    store: &mut SourceStore,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    match cmd {
        GuiCommand::LoadSource { path } => {
            handlers::source::handle_load(path, store, update_tx).await;
        }
        GuiCommand::RenderPreview { doc_id, page_index } => {
            handlers::source::handle_render_preview(doc_id, page_index, store, update_tx).await;
        }
        GuiCommand::CalculateStats { doc_id, config } => {
            handlers::source::handle_calculate_stats(doc_id, config, store, update_tx).await;
        }
        GuiCommand::Split {
            input_path,
            output_path,
            config,
        } => {
            handlers::split::handle_split(input_path, output_path, config, update_tx).await;
        }
        GuiCommand::LoadConfig { path } => {
            handlers::split::handle_load_config(path, update_tx).await;
        }
        GuiCommand::SaveConfig { path, config } => {
            handlers::split::handle_save_config(path, config, update_tx).await;
        }
        GuiCommand::CloseSource { doc_id } => {
            handlers::source::handle_close(doc_id, store, update_tx).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_async_runtime::{DocumentId, GridConfig};
    use std::path::PathBuf;

    fn preview(page_index: usize) -> GuiCommand {
        GuiCommand::RenderPreview {
            doc_id: DocumentId(1),
            page_index,
        }
    }

    #[test]
    fn test_coalesce_keeps_latest_preview() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(preview(1)).unwrap();
        tx.send(preview(2)).unwrap();
        tx.send(GuiCommand::LoadConfig {
            path: PathBuf::from("grid.json"),
        })
        .unwrap();
        tx.send(preview(3)).unwrap();

        let mut pending = None;
        let cmd = coalesce(preview(0), &mut rx, &mut pending);

        assert!(matches!(cmd, GuiCommand::RenderPreview { page_index: 2, .. }));
        assert!(matches!(pending, Some(GuiCommand::LoadConfig { .. })));
        // The preview queued after the config load is still waiting
        assert!(matches!(
            rx.try_recv(),
            Ok(GuiCommand::RenderPreview { page_index: 3, .. })
        ));
    }

    #[test]
    fn test_coalesce_leaves_split_alone() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(GuiCommand::Split {
            input_path: PathBuf::from("a.pdf"),
            output_path: PathBuf::from("b.pdf"),
            config: GridConfig::default(),
        })
        .unwrap();

        let mut pending = None;
        let cmd = coalesce(
            GuiCommand::CalculateStats {
                doc_id: DocumentId(1),
                config: GridConfig::default(),
            },
            &mut rx,
            &mut pending,
        );

        assert!(matches!(cmd, GuiCommand::CalculateStats { .. }));
        assert!(matches!(pending, Some(GuiCommand::Split { .. })));
    }
}
