//! Request orchestration for the Send and Translate actions.
//!
//! Each action goes through three steps so that requests can overlap:
//!
//! 1. `begin_*` validates the input and applies the pre-dispatch transcript
//!    changes, returning a [`Submission`].
//! 2. [`dispatch`] performs the HTTP call without touching the session and maps
//!    every response shape to an [`Outcome`].
//! 3. [`ChatSession::complete`] hides the thinking indicator and appends the
//!    outcome message.
//!
//! [`ChatSession::send`] and [`ChatSession::translate`] run all three in order.

use crate::api::{ApiClient, ChatResponse, TranslateResponse};
use crate::language::{reply_language_name, ReplyLanguage, UiLanguage};
use crate::opener::UrlOpener;
use crate::preferences::UiLanguageState;
use crate::transcript::Transcript;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    Translate,
}

/// A dispatched request. Not `Clone`: it is consumed by exactly one completion.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: u64,
    pub kind: RequestKind,
    pub payload: String,
    pub reply_lang: ReplyLanguage,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Input was empty after trimming; nothing was sent.
    Rejected,
    Dispatched(PendingRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Chat succeeded with a non-empty reply.
    Reply(String),
    /// Chat reported success but carried no reply.
    EmptyReply,
    Translated {
        translation: String,
        reply_lang: String,
        translate_url: Option<String>,
    },
    /// Translate reported success without a translation.
    NoTranslation { translate_url: Option<String> },
    /// `success: false`, with the server's error text if it sent one.
    ServerError(Option<String>),
    /// The request could not be sent or the body could not be decoded.
    TransportError(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Reply(_) | Outcome::EmptyReply | Outcome::Translated { .. } | Outcome::NoTranslation { .. }
        )
    }

    pub fn translate_url(&self) -> Option<&str> {
        match self {
            Outcome::Translated { translate_url, .. } | Outcome::NoTranslation { translate_url } => {
                translate_url.as_deref()
            }
            _ => None,
        }
    }

    pub fn from_chat(response: ChatResponse) -> Self {
        if !response.success {
            return Outcome::ServerError(non_empty(response.error));
        }
        match non_empty(response.response) {
            Some(reply) => Outcome::Reply(reply),
            None => Outcome::EmptyReply,
        }
    }

    pub fn from_translate(response: TranslateResponse, requested: ReplyLanguage) -> Self {
        if !response.success {
            return Outcome::ServerError(non_empty(response.error));
        }
        let translate_url = non_empty(response.translate_url);
        match non_empty(response.translation) {
            Some(translation) => Outcome::Translated {
                translation,
                reply_lang: non_empty(response.reply_lang)
                    .unwrap_or_else(|| requested.as_str().to_string()),
                translate_url,
            },
            None => Outcome::NoTranslation { translate_url },
        }
    }
}

// Whitespace-only fields count as absent: a blank reply is reported as empty and a
// blank translate_url is never opened.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug)]
pub struct Completion {
    pub request: PendingRequest,
    pub outcome: Outcome,
}

/// Perform the network call for `request`. Never fails: transport errors become
/// [`Outcome::TransportError`].
pub async fn dispatch(client: &ApiClient, request: PendingRequest) -> Completion {
    let reply_lang = request.reply_lang.as_str();
    tracing::debug!(id = request.id, kind = ?request.kind, reply_lang, "Dispatching request");

    let outcome = match request.kind {
        RequestKind::Chat => match client.chat(&request.payload, reply_lang).await {
            Ok(response) => Outcome::from_chat(response),
            Err(e) => Outcome::TransportError(e.to_string()),
        },
        RequestKind::Translate => match client.translate(&request.payload, reply_lang).await {
            Ok(response) => Outcome::from_translate(response, request.reply_lang),
            Err(e) => Outcome::TransportError(e.to_string()),
        },
    };

    match &outcome {
        Outcome::TransportError(e) => tracing::error!(id = request.id, "Request failed: {}", e),
        Outcome::ServerError(e) => {
            tracing::warn!(id = request.id, error = e.as_deref().unwrap_or(""), "Server reported failure")
        }
        _ => tracing::debug!(id = request.id, "Request succeeded"),
    }

    Completion { request, outcome }
}

pub struct ChatSession {
    pub transcript: Transcript,
    pub input: String,
    ui: UiLanguageState,
    reply_lang: ReplyLanguage,
    client: ApiClient,
    opener: Box<dyn UrlOpener>,
    next_request_id: u64,
    in_flight: usize,
}

impl ChatSession {
    pub fn new(
        client: ApiClient,
        ui: UiLanguageState,
        reply_lang: ReplyLanguage,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            ui,
            reply_lang,
            client,
            opener,
            next_request_id: 0,
            in_flight: 0,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn ui(&self) -> &UiLanguageState {
        &self.ui
    }

    pub fn ui_language(&self) -> UiLanguage {
        self.ui.current()
    }

    /// Change the UI language and persist it.
    pub fn set_ui_language(&mut self, lang: UiLanguage) -> Result<()> {
        self.ui.set(lang)
    }

    pub fn reply_language(&self) -> ReplyLanguage {
        self.reply_lang
    }

    pub fn set_reply_language(&mut self, lang: ReplyLanguage) {
        self.reply_lang = lang;
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.ui.t(key)
    }

    /// Requests dispatched but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn pending(&mut self, kind: RequestKind, payload: String) -> PendingRequest {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight += 1;
        PendingRequest {
            id,
            kind,
            payload,
            reply_lang: self.reply_lang,
        }
    }

    /// Validate and stage a chat request. Empty input changes nothing.
    pub fn begin_send(&mut self) -> Submission {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return Submission::Rejected;
        }

        self.transcript.append_user_message(&message);
        self.input.clear();
        self.transcript.show_thinking(self.ui.current());

        Submission::Dispatched(self.pending(RequestKind::Chat, message))
    }

    /// Validate and stage a translate request. Empty input appends a notice and
    /// no user message. The input is kept.
    pub fn begin_translate(&mut self) -> Submission {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            let notice = self.t("error-no-message").to_string();
            self.transcript.append_bot_message(&notice);
            return Submission::Rejected;
        }

        self.transcript.append_user_message(&text);
        self.transcript.show_thinking(self.ui.current());

        Submission::Dispatched(self.pending(RequestKind::Translate, text))
    }

    /// Apply a finished request to the transcript and return its outcome.
    pub fn complete(&mut self, completion: Completion) -> Outcome {
        let Completion { request, outcome } = completion;
        self.in_flight = self.in_flight.saturating_sub(1);

        self.transcript.hide_thinking();
        let text = self.outcome_message(&request, &outcome);
        self.transcript.append_bot_message(&text);

        if request.kind == RequestKind::Translate {
            if let Some(url) = outcome.translate_url() {
                if let Err(e) = self.opener.open(url) {
                    tracing::warn!("Failed to open translation page: {}", e);
                }
            }
        }

        outcome
    }

    /// Settle a request whose result will never arrive, e.g. because its task
    /// was cancelled. Ends in a connection error like any transport failure.
    pub fn abandon(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.transcript.hide_thinking();
        let text = self.t("error-connection").to_string();
        self.transcript.append_bot_message(&text);
    }

    fn outcome_message(&self, request: &PendingRequest, outcome: &Outcome) -> String {
        match (request.kind, outcome) {
            (_, Outcome::Reply(reply)) => reply.clone(),
            (_, Outcome::EmptyReply) => self.t("error-processing").to_string(),
            (RequestKind::Chat, Outcome::ServerError(Some(error))) => error.clone(),
            (_, Outcome::ServerError(_)) => self.t("error-processing").to_string(),
            (_, Outcome::Translated { translation, reply_lang, .. }) => format!(
                "Translation ({}): {}",
                reply_language_name(reply_lang),
                translation
            ),
            (_, Outcome::NoTranslation { .. }) => {
                format!("{}: \"{}\"", self.t("translate-tooltip"), request.payload)
            }
            (_, Outcome::TransportError(_)) => self.t("error-connection").to_string(),
        }
    }

    /// Run the Send action to completion. Returns `None` when the input was empty.
    pub async fn send(&mut self) -> Option<Outcome> {
        match self.begin_send() {
            Submission::Rejected => None,
            Submission::Dispatched(request) => {
                let completion = dispatch(&self.client, request).await;
                Some(self.complete(completion))
            }
        }
    }

    /// Run the Translate action to completion. Returns `None` when the input was empty.
    pub async fn translate(&mut self) -> Option<Outcome> {
        match self.begin_translate() {
            Submission::Rejected => None,
            Submission::Dispatched(request) => {
                let completion = dispatch(&self.client, request).await;
                Some(self.complete(completion))
            }
        }
    }
}
