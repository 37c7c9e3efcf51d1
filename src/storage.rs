use crate::errors::AppError;
use crate::models::CounterData;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_data(path: &Path) -> CounterData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse counter file: {err}");
                CounterData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => CounterData::default(),
        Err(err) => {
            error!("failed to read counter file: {err}");
            CounterData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &CounterData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await.map_err(AppError::storage)?;
    Ok(())
}
