//! The board screen: fetch, publish and delete, one request per action.
//!
//! Each failed action surfaces as exactly one [`ScreenError`], whose
//! `Display` text is the alert shown to the user. The underlying cause is
//! kept as the error source for logs.

use mural_core::{ApiError, Board, Message, MessageId, MuralClient, NewMessage, OrderMode};
use thiserror::Error;

use crate::transport::{Transport, TransportError};

#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Could not load messages. Check the API URL and your connection.")]
    Load(#[source] Failure),
    #[error("Fill in your name and the message before publishing.")]
    IncompleteDraft(#[source] ApiError),
    #[error("Could not publish the message. Try again.")]
    Publish(#[source] Failure),
    #[error("Could not delete the message.")]
    Delete(#[source] Failure),
}

pub struct Screen<T> {
    client: MuralClient,
    transport: T,
    board: Board,
}

impl<T: Transport> Screen<T> {
    pub fn new(client: MuralClient, transport: T, mode: OrderMode) -> Self {
        Self {
            client,
            transport,
            board: Board::new(mode),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_mode(&mut self, mode: OrderMode) {
        self.board.set_mode(mode);
    }

    /// Refetch the whole board and order it by the current mode.
    pub fn refresh(&mut self) -> Result<(), ScreenError> {
        let listing = self.fetch().map_err(ScreenError::Load)?;
        tracing::info!(count = listing.len(), mode = %self.board.mode(), "board loaded");
        self.board.replace(listing);
        Ok(())
    }

    fn fetch(&self) -> Result<Vec<Message>, Failure> {
        let response = self.transport.execute(self.client.build_list_messages())?;
        Ok(self.client.parse_list_messages(response)?)
    }

    /// Validate and publish a draft. Returns the stored record when the
    /// store echoes it. Does not refetch; call [`Screen::refresh`] after.
    pub fn publish(&mut self, author: &str, body: &str) -> Result<Option<Message>, ScreenError> {
        let draft = NewMessage::from_form(author, body).map_err(ScreenError::IncompleteDraft)?;
        let request = self
            .client
            .build_create_message(&draft)
            .map_err(|e| ScreenError::Publish(e.into()))?;
        let response = self
            .transport
            .execute(request)
            .map_err(|e| ScreenError::Publish(e.into()))?;
        let created = self
            .client
            .parse_create_message(response)
            .map_err(|e| ScreenError::Publish(e.into()))?;
        tracing::info!(author = %draft.author, "message published");
        Ok(created)
    }

    /// Delete a message in the store, then drop it from the local board.
    pub fn delete(&mut self, id: &MessageId) -> Result<(), ScreenError> {
        let response = self
            .transport
            .execute(self.client.build_delete_message(id))
            .map_err(|e| ScreenError::Delete(e.into()))?;
        self.client
            .parse_delete_message(response)
            .map_err(|e| ScreenError::Delete(e.into()))?;
        if !self.board.remove(id) {
            tracing::debug!(%id, "deleted message was not on the local board");
        }
        tracing::info!(%id, "message deleted");
        Ok(())
    }
}
