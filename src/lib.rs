pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod submission;
pub mod ui;

pub use app::router;
pub use client::{CounterClient, CounterClientError, HttpCounterClient};
pub use config::ServerConfig;
pub use state::AppState;
pub use storage::load_data;
pub use submission::{
    InputField, MessageArea, Submission, SubmissionError, SubmissionHandler, SubmissionOptions,
    SubmitEvent, TextCell, CONFIRMATION_MESSAGE, MESSAGE_CLEAR_DELAY,
};
