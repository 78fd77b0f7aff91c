//! Conversational-agent client with an explicit session state machine
//!
//! The agent platform is driven by three sequential HTTP calls: create a
//! conversation, post a message, poll the message history for a reply.
//! Each transition is gated on the corresponding call succeeding; any
//! failure moves the session to `Failed` with the originating error
//! retained for display. Nothing is auto-retried.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::AdviceError;

/// A message in the agent conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub text: String,
}

/// Seam for the agent platform's HTTP surface
pub trait AgentTransport {
    /// Create a conversation, returning its identifier
    fn create_conversation(&self) -> Result<String, AdviceError>;

    /// Post a text message to a conversation
    fn send_message(&self, conversation_id: &str, text: &str) -> Result<(), AdviceError>;

    /// Fetch the conversation's message history, oldest first
    fn list_messages(&self, conversation_id: &str) -> Result<Vec<AgentMessage>, AdviceError>;
}

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Uninitialized,
    ConversationOpen,
    MessageSent,
    ReplyReceived,
    Failed,
}

impl AgentState {
    fn name(&self) -> &'static str {
        match self {
            AgentState::Uninitialized => "Uninitialized",
            AgentState::ConversationOpen => "ConversationOpen",
            AgentState::MessageSent => "MessageSent",
            AgentState::ReplyReceived => "ReplyReceived",
            AgentState::Failed => "Failed",
        }
    }
}

/// One agent conversation, scoped to a single user session.
///
/// The conversation identifier lives inside the session value rather than
/// in ambient state; dropping the session is the teardown. A new session
/// starts over from `Uninitialized`.
pub struct AgentSession<T: AgentTransport> {
    transport: T,
    state: AgentState,
    conversation_id: Option<String>,
    last_sent: Option<String>,
    last_error: Option<AdviceError>,
}

impl<T: AgentTransport> AgentSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: AgentState::Uninitialized,
            conversation_id: None,
            last_sent: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Error that moved the session to `Failed`, if any
    pub fn last_error(&self) -> Option<&AdviceError> {
        self.last_error.as_ref()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Open a conversation: `Uninitialized -> ConversationOpen`
    pub fn open(&mut self) -> Result<(), AdviceError> {
        if self.state != AgentState::Uninitialized {
            return Err(AdviceError::BadState(self.state.name()));
        }
        match self.transport.create_conversation() {
            Ok(id) => {
                debug!("agent conversation opened: {}", id);
                self.conversation_id = Some(id);
                self.state = AgentState::ConversationOpen;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Send a message: `ConversationOpen | ReplyReceived -> MessageSent`
    pub fn send(&mut self, text: &str) -> Result<(), AdviceError> {
        if !matches!(
            self.state,
            AgentState::ConversationOpen | AgentState::ReplyReceived
        ) {
            return Err(AdviceError::BadState(self.state.name()));
        }
        let conversation_id = self
            .conversation_id
            .clone()
            .ok_or(AdviceError::BadState("no conversation"))?;

        match self.transport.send_message(&conversation_id, text) {
            Ok(()) => {
                self.last_sent = Some(text.to_string());
                self.state = AgentState::MessageSent;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Check the conversation history for a reply:
    /// `MessageSent -> ReplyReceived` once a message other than the one we
    /// sent appears. Returns `Ok(None)` while no reply has arrived yet.
    pub fn poll_reply(&mut self) -> Result<Option<String>, AdviceError> {
        if self.state != AgentState::MessageSent {
            return Err(AdviceError::BadState(self.state.name()));
        }
        let conversation_id = self
            .conversation_id
            .clone()
            .ok_or(AdviceError::BadState("no conversation"))?;

        match self.transport.list_messages(&conversation_id) {
            Ok(messages) => {
                let reply = messages
                    .into_iter()
                    .rev()
                    .find(|m| Some(&m.text) != self.last_sent.as_ref());
                if let Some(reply) = reply {
                    self.state = AgentState::ReplyReceived;
                    Ok(Some(reply.text))
                } else {
                    Ok(None)
                }
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, error: AdviceError) -> AdviceError {
        self.state = AgentState::Failed;
        self.last_error = Some(error.clone());
        error
    }
}

// ---------------------------------------------------------------------------
// Botpress transport
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ConversationResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    #[serde(rename = "conversationId")]
    conversation_id: &'a str,
    #[serde(rename = "type")]
    message_type: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListMessagesResponse {
    messages: Vec<BotpressMessage>,
}

#[derive(Debug, Deserialize)]
struct BotpressMessage {
    payload: BotpressPayload,
}

#[derive(Debug, Deserialize)]
struct BotpressPayload {
    #[serde(default)]
    text: Option<String>,
}

/// Botpress chat API transport: bearer token plus bot identifier header
pub struct BotpressClient {
    client: Client,
    base_url: String,
    bot_id: String,
    token: String,
}

impl BotpressClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://chat.botpress.cloud/v1/chat";

    pub fn new(bot_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL, bot_id, token)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        bot_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            bot_id: bot_id.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn parse_conversation(body: &str) -> Result<String, AdviceError> {
        let response: ConversationResponse = serde_json::from_str(body)
            .map_err(|e| AdviceError::MalformedResponse(e.to_string()))?;
        Ok(response.id)
    }

    fn parse_messages(body: &str) -> Result<Vec<AgentMessage>, AdviceError> {
        let response: ListMessagesResponse = serde_json::from_str(body)
            .map_err(|e| AdviceError::MalformedResponse(e.to_string()))?;
        Ok(response
            .messages
            .into_iter()
            .filter_map(|m| m.payload.text)
            .map(|text| AgentMessage { text })
            .collect())
    }

    fn check_status(response: reqwest::blocking::Response) -> Result<String, AdviceError> {
        let status = response.status();
        if !status.is_success() {
            return Err(AdviceError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| AdviceError::Transport(e.to_string()))
    }
}

impl AgentTransport for BotpressClient {
    fn create_conversation(&self) -> Result<String, AdviceError> {
        let response = self
            .client
            .post(self.url("conversations"))
            .bearer_auth(&self.token)
            .header("x-bot-id", &self.bot_id)
            .send()
            .map_err(|e| AdviceError::Transport(e.to_string()))?;

        let body = Self::check_status(response)?;
        Self::parse_conversation(&body)
    }

    fn send_message(&self, conversation_id: &str, text: &str) -> Result<(), AdviceError> {
        let request = SendMessageRequest {
            conversation_id,
            message_type: "text",
            text,
        };
        let response = self
            .client
            .post(self.url("messages"))
            .bearer_auth(&self.token)
            .header("x-bot-id", &self.bot_id)
            .json(&request)
            .send()
            .map_err(|e| AdviceError::Transport(e.to_string()))?;

        Self::check_status(response).map(|_| ())
    }

    fn list_messages(&self, conversation_id: &str) -> Result<Vec<AgentMessage>, AdviceError> {
        let response = self
            .client
            .get(self.url(&format!("conversations/{}/messages", conversation_id)))
            .bearer_auth(&self.token)
            .header("x-bot-id", &self.bot_id)
            .send()
            .map_err(|e| AdviceError::Transport(e.to_string()))?;

        let body = Self::check_status(response)?;
        Self::parse_messages(&body)
    }
}
