//! Per-chat wizard session executor
//!
//! A session owns one chat's state and processes that chat's events strictly
//! in order: pure transition, then effects executed in the order the
//! transition listed them. Fetch outcomes are fed back into the machine as
//! events, so delivery ordering around the terminal fetch is encoded in the
//! transitions rather than here.

use super::traits::DeliveryAdapter;
use crate::avatar::AvatarFetcher;
use crate::state_machine::{transition, ChatId, Effect, Event, WizardContext, WizardState};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub(super) struct WizardSession<D, F>
where
    D: DeliveryAdapter + 'static,
    F: AvatarFetcher + 'static,
{
    chat: ChatId,
    state: WizardState,
    context: Arc<WizardContext>,
    delivery: Arc<D>,
    fetcher: Arc<F>,
    cancel: CancellationToken,
    rx: mpsc::Receiver<Event>,
}

impl<D, F> WizardSession<D, F>
where
    D: DeliveryAdapter + 'static,
    F: AvatarFetcher + 'static,
{
    pub(super) fn new(
        chat: ChatId,
        context: Arc<WizardContext>,
        delivery: Arc<D>,
        fetcher: Arc<F>,
        cancel: CancellationToken,
        rx: mpsc::Receiver<Event>,
    ) -> Self {
        Self {
            chat,
            state: WizardState::Idle,
            context,
            delivery,
            fetcher,
            cancel,
            rx,
        }
    }

    /// Process events until the wizard returns to `Idle`, the engine shuts
    /// down, or the channel closes. Returns when the session should be
    /// deregistered.
    pub(super) async fn run(mut self) {
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,
                maybe = self.rx.recv() => match maybe {
                    Some(event) => {
                        self.process_event(event).await;
                        if matches!(self.state, WizardState::Idle) {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }

        // Events that raced in behind a terminal event are dropped; the
        // sender will re-route the chat's next event to a fresh session.
        self.rx.close();
        let mut dropped = 0usize;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::debug!(chat = self.chat, dropped, "Dropped events behind terminal state");
        }
    }

    /// Handle one inbound event, including any events generated by its
    /// effects (the fetch outcome).
    pub(super) async fn process_event(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(current) = queue.pop_front() {
            let result = transition(&self.state, &self.context, current);
            self.state = result.new_state;

            for effect in result.effects {
                match self.execute_effect(effect).await {
                    Ok(Some(generated)) => queue.push_back(generated),
                    Ok(None) => {}
                    Err(error) => {
                        tracing::error!(chat = self.chat, %error, "Delivery failed");
                    }
                }
            }
        }
    }

    async fn execute_effect(&self, effect: Effect) -> Result<Option<Event>, String> {
        let chat = self.chat;
        match effect {
            Effect::ClearMenu { message_id } => self
                .delivery
                .clear_menu(chat, message_id)
                .await
                .map(|()| None),
            Effect::SendText { text } => self.delivery.send_text(chat, &text).await.map(|()| None),
            Effect::SendMenu { text, choices } => self
                .delivery
                .send_menu(chat, &text, &choices)
                .await
                .map(|()| None),
            Effect::SendPhoto { bytes, filename } => self
                .delivery
                .send_photo(chat, bytes, &filename)
                .await
                .map(|()| None),
            Effect::SendDocument { bytes, filename } => self
                .delivery
                .send_document(chat, bytes, &filename)
                .await
                .map(|()| None),
            Effect::FetchAvatar { request } => {
                tracing::info!(
                    chat,
                    style = %request.style,
                    seed = %request.seed,
                    format = %request.format,
                    background = ?request.background_color,
                    "Fetching avatar"
                );
                tokio::select! {
                    () = self.cancel.cancelled() => {
                        tracing::info!(chat, "Shutdown during avatar fetch, abandoning");
                        Ok(None)
                    }
                    result = self.fetcher.fetch(&request) => {
                        if let Err(error) = &result {
                            tracing::error!(chat, %error, "Avatar fetch failed");
                        }
                        Ok(Some(Event::FetchResolved { result }))
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub(super) fn state(&self) -> &WizardState {
        &self.state
    }
}
