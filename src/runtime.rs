//! Runtime for executing wizard conversations
//!
//! One session task per active chat owns that chat's wizard state; sessions
//! for different chats run concurrently, while a single chat's events are
//! processed strictly in order. A chat has a map entry exactly while its
//! wizard is in progress.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use traits::DeliveryAdapter;

use crate::avatar::AvatarFetcher;
use crate::state_machine::{ChatId, Event, WizardContext};
use executor::WizardSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// Per-session event buffer; a wizard only ever has a handful in flight.
const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Engine owning the per-chat session map.
pub struct WizardEngine<D, F>
where
    D: DeliveryAdapter + 'static,
    F: AvatarFetcher + 'static,
{
    context: Arc<WizardContext>,
    delivery: Arc<D>,
    fetcher: Arc<F>,
    sessions: Mutex<HashMap<ChatId, mpsc::Sender<Event>>>,
    cancel: CancellationToken,
}

impl<D, F> WizardEngine<D, F>
where
    D: DeliveryAdapter + 'static,
    F: AvatarFetcher + 'static,
{
    pub fn new(context: WizardContext, delivery: D, fetcher: F, cancel: CancellationToken) -> Arc<Self> {
        Arc::new(Self {
            context: Arc::new(context),
            delivery: Arc::new(delivery),
            fetcher: Arc::new(fetcher),
            sessions: Mutex::new(HashMap::new()),
            cancel,
        })
    }

    /// Route one inbound event to its chat's session, creating the session
    /// if the chat has no wizard in progress.
    pub async fn handle(self: &Arc<Self>, chat: ChatId, event: Event) {
        let mut event = event;
        loop {
            let tx = self.session_tx(chat).await;
            match tx.send(event).await {
                Ok(()) => return,
                // The session ended between lookup and send; deregister it
                // and retry against a fresh one.
                Err(mpsc::error::SendError(returned)) => {
                    self.remove_session(chat, &tx).await;
                    event = returned;
                }
            }
        }
    }

    /// Atomically get or create the event channel for a chat.
    async fn session_tx(self: &Arc<Self>, chat: ChatId) -> mpsc::Sender<Event> {
        let mut sessions = self.sessions.lock().await;
        if let Some(tx) = sessions.get(&chat) {
            return tx.clone();
        }

        let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        sessions.insert(chat, tx.clone());

        let session = WizardSession::new(
            chat,
            Arc::clone(&self.context),
            Arc::clone(&self.delivery),
            Arc::clone(&self.fetcher),
            self.cancel.clone(),
            rx,
        );
        let engine = Arc::clone(self);
        let session_tx = tx.clone();
        tokio::spawn(async move {
            session.run().await;
            engine.remove_session(chat, &session_tx).await;
        });

        tx
    }

    /// Deregister a finished session, unless the chat has already been given
    /// a newer one.
    async fn remove_session(&self, chat: ChatId, tx: &mpsc::Sender<Event>) {
        let mut sessions = self.sessions.lock().await;
        if let Some(current) = sessions.get(&chat) {
            if current.same_channel(tx) {
                sessions.remove(&chat);
            }
        }
    }

    /// Whether a wizard is currently in progress for the chat.
    #[allow(dead_code)] // Useful for tests
    pub async fn has_session(&self, chat: ChatId) -> bool {
        self.sessions.lock().await.contains_key(&chat)
    }
}
