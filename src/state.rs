use crate::models::CounterData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<CounterData>>,
    pub external_form_url: Option<String>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: CounterData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            external_form_url: None,
        }
    }

    pub fn with_external_form_url(mut self, url: Option<String>) -> Self {
        self.external_form_url = url;
        self
    }
}
