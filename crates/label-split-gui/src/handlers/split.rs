use label_async_runtime::{GridConfig, GuiUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_split(
    input_path: PathBuf,
    output_path: PathBuf,
    config: GridConfig,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    let _ = update_tx.send(GuiUpdate::Progress {
        operation: format!("Splitting {}", input_path.display()),
        current: 0,
        total: 1,
    });

    let result = async {
        label_split::ensure_input_file(&input_path).await?;
        label_split::split_into_tiles(&input_path, &output_path, &config).await
    }
    .await;

    match result {
        Ok(stats) => {
            let _ = update_tx.send(GuiUpdate::SplitComplete {
                path: output_path,
                stats,
            });
        }
        Err(e) => {
            log::error!("Split failed: {}", e);
            let _ = update_tx.send(GuiUpdate::SplitFailed {
                message: e.to_string(),
                validation: e.is_validation(),
            });
        }
    }
}

pub async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<GuiUpdate>) {
    match GridConfig::load(&path).await {
        Ok(config) => {
            log::info!("Configuration loaded from {}", path.display());
            let _ = update_tx.send(GuiUpdate::ConfigLoaded { config });
        }
        Err(e) => {
            let _ = update_tx.send(GuiUpdate::Error {
                message: format!("Failed to load configuration: {}", e),
            });
        }
    }
}

pub async fn handle_save_config(
    path: PathBuf,
    config: GridConfig,
    update_tx: &mpsc::UnboundedSender<GuiUpdate>,
) {
    match config.save(&path).await {
        Ok(()) => {
            log::info!("Configuration saved to {}", path.display());
            let _ = update_tx.send(GuiUpdate::ConfigSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(GuiUpdate::Error {
                message: format!("Failed to save configuration: {}", e),
            });
        }
    }
}
