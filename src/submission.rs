//! Registration form handling, independent of any particular page.
//!
//! A [`SubmissionHandler`] is wired to the input it reads, the message area it
//! writes and the counter it signals. Each submission clears the input, fires
//! the increment in the background and shows a confirmation that clears itself
//! after [`SubmissionOptions::clear_after`]. Only the most recent confirmation
//! owns the clear timer.

use crate::client::{CounterClient, CounterClientError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{error, info};

pub const CONFIRMATION_MESSAGE: &str = "Thanks for registration!";
pub const MESSAGE_CLEAR_DELAY: Duration = Duration::from_millis(5000);

/// A form submission. Handling it always prevents the default navigation.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub trait InputField: Send + Sync {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

pub trait MessageArea: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Shared text slot usable as either an input or a message area.
#[derive(Debug, Clone, Default)]
pub struct TextCell(Arc<Mutex<String>>);

impl TextCell {
    pub fn new(initial: impl Into<String>) -> Self {
        Self(Arc::new(Mutex::new(initial.into())))
    }

    pub fn get(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, text: &str) {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clear();
        slot.push_str(text);
    }
}

impl InputField for TextCell {
    fn value(&self) -> String {
        self.get()
    }

    fn set_value(&self, value: &str) {
        self.set(value);
    }
}

impl MessageArea for TextCell {
    fn set_text(&self, text: &str) {
        self.set(text);
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionOptions {
    /// Show the confirmation as soon as the request is issued, whatever its outcome.
    /// When off, the confirmation waits for a successful increment and failures show nothing.
    pub optimistic: bool,
    pub confirmation: String,
    pub clear_after: Duration,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            optimistic: true,
            confirmation: CONFIRMATION_MESSAGE.to_string(),
            clear_after: MESSAGE_CLEAR_DELAY,
        }
    }
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Counter(#[from] CounterClientError),

    #[error("increment task did not complete: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// The in-flight side of one submission.
#[derive(Debug)]
pub struct Submission {
    email: String,
    request: JoinHandle<Result<u64, CounterClientError>>,
}

impl Submission {
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Waits for the increment and returns the new count. Failures have already been logged.
    pub async fn outcome(self) -> Result<u64, SubmissionError> {
        Ok(self.request.await??)
    }
}

pub struct SubmissionHandler<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for SubmissionHandler<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<C> {
    client: C,
    input: Arc<dyn InputField>,
    message: Arc<dyn MessageArea>,
    options: SubmissionOptions,
    pending_clear: Arc<Mutex<PendingClear>>,
}

/// The clear timer owned by the latest confirmation. Message writes happen under this lock.
#[derive(Default)]
struct PendingClear {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl<C: CounterClient + 'static> SubmissionHandler<C> {
    pub fn new(client: C, input: Arc<dyn InputField>, message: Arc<dyn MessageArea>) -> Self {
        Self::with_options(client, input, message, SubmissionOptions::default())
    }

    pub fn with_options(
        client: C,
        input: Arc<dyn InputField>,
        message: Arc<dyn MessageArea>,
        options: SubmissionOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                input,
                message,
                options,
                pending_clear: Arc::new(Mutex::new(PendingClear::default())),
            }),
        }
    }

    pub fn options(&self) -> &SubmissionOptions {
        &self.inner.options
    }

    /// Handles one submission. Must be called from within a tokio runtime.
    ///
    /// Never fails: the increment runs in the background and its errors are
    /// logged. Await [`Submission::outcome`] to observe the result.
    pub fn handle_submit(&self, event: &mut SubmitEvent) -> Submission {
        event.prevent_default();

        let email = self.inner.input.value();
        self.inner.input.set_value("");

        let inner = Arc::clone(&self.inner);
        let captured = email.clone();
        let request = tokio::spawn(async move {
            match inner.client.increment(&captured).await {
                Ok(response) => {
                    info!(new_count = response.new_count, "registration counted");
                    if !inner.options.optimistic {
                        inner.show_confirmation();
                    }
                    Ok(response.new_count)
                }
                Err(err) => {
                    error!("there was a problem with the increment request: {err}");
                    Err(err)
                }
            }
        });

        if self.inner.options.optimistic {
            self.inner.show_confirmation();
        }

        Submission { email, request }
    }
}

impl<C> Inner<C> {
    fn show_confirmation(&self) {
        let mut pending = self
            .pending_clear
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.handle.take() {
            previous.abort();
        }
        pending.generation += 1;
        let generation = pending.generation;

        self.message.set_text(&self.options.confirmation);

        let deadline = Instant::now() + self.options.clear_after;
        let message = Arc::clone(&self.message);
        let slot = Arc::clone(&self.pending_clear);
        pending.handle = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            let pending = slot.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer confirmation owns the message now.
            if pending.generation == generation {
                message.set_text("");
            }
        }));
    }
}
