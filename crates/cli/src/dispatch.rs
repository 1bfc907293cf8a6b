//! Event dispatch: one inbound event in, its replies out.
//!
//! Each event is handled independently in a single pass:
//! `Received → Validated → Predicted → Replied`, with a short-circuit to an
//! error reply at validation or prediction. Nothing is kept between events.

use std::path::PathBuf;
use std::sync::Arc;

use visibot_model::Regressor;

use crate::commands;
use crate::error::HandleError;
use crate::event::{Command, InboundEvent};
use crate::formatter;
use crate::intake::{self, IntakeError, Rejection};
use crate::messages;
use crate::transport::Transport;

/// What the user was told.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Answered(Command),
    Predicted { rows: usize },
    Rejected(Rejection),
    PredictionFailed,
}

/// Process-wide state: the model and the example template, both read-only.
#[derive(Clone)]
pub struct Bot {
    model: Arc<dyn Regressor>,
    example_path: PathBuf,
}

impl Bot {
    pub fn new(model: Arc<dyn Regressor>, example_path: PathBuf) -> Self {
        Self { model, example_path }
    }

    pub fn handle(&self, event: InboundEvent, transport: &dyn Transport) -> Result<Outcome, HandleError> {
        let outcome = match event {
            InboundEvent::Command { chat, command } => {
                commands::respond(command, chat, &self.example_path, transport)?;
                Outcome::Answered(command)
            }
            InboundEvent::DocumentUpload { chat, file } => {
                match intake::receive(file.as_ref(), transport) {
                    Ok(table) => match formatter::predict_reply(self.model.as_ref(), &table) {
                        Ok(reply) => {
                            for part in formatter::split_message(&reply, messages::MAX_MESSAGE_CHARS) {
                                transport.send_text(chat, &part)?;
                            }
                            Outcome::Predicted { rows: table.row_count() }
                        }
                        Err(e) => {
                            log::warn!(
                                "chat {}: prediction failed: {} (model expects {} columns)",
                                chat,
                                e,
                                self.model.features().len()
                            );
                            transport.send_text(chat, messages::PREDICTION_FAILURE)?;
                            Outcome::PredictionFailed
                        }
                    },
                    Err(IntakeError::Rejected(rejection)) => {
                        log::info!("chat {}: {}", chat, rejection);
                        transport.send_text(chat, rejection.reply())?;
                        Outcome::Rejected(rejection)
                    }
                    Err(IntakeError::Transport(e)) => {
                        // Tell the user, then report the fetch error.
                        if let Err(send) = transport.send_text(chat, messages::FETCH_FAILURE) {
                            log::debug!("chat {}: fetch failure reply not sent: {}", chat, send);
                        }
                        return Err(e.into());
                    }
                }
            }
        };
        Ok(outcome)
    }
}
