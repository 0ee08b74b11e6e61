//! Twitch IRC adapter

use async_trait::async_trait;
use twitch_irc::login::StaticLoginCredentials;
use twitch_irc::message::{PrivmsgMessage, ServerMessage};
use twitch_irc::{ClientConfig, SecureTCPTransport, TwitchIRCClient};

use crate::application::errors::BotError;
use crate::domain::entities::ChatMessage;
use crate::domain::traits::{BotInfo, Chat};

type IrcClient = TwitchIRCClient<SecureTCPTransport, StaticLoginCredentials>;

/// Raw inbound stream handed out by the client on connect
pub type Incoming = tokio::sync::mpsc::UnboundedReceiver<ServerMessage>;

/// Twitch chat transport over the twitch-irc client
pub struct TwitchAdapter {
    client: IrcClient,
    info: BotInfo,
}

impl TwitchAdapter {
    /// Builds the client and returns it together with the inbound stream.
    ///
    /// The connection itself is established lazily by the client on the
    /// first join. Dropping the adapter and the stream tears it down.
    pub fn connect(login: &str, token: &str) -> (Self, Incoming) {
        let token = token.trim_start_matches("oauth:").to_string();
        let credentials = StaticLoginCredentials::new(login.to_string(), Some(token));
        let (incoming, client) = IrcClient::new(ClientConfig::new_simple(credentials));

        let adapter = Self {
            client,
            info: BotInfo {
                name: login.to_string(),
            },
        };
        (adapter, incoming)
    }

    /// Joins a channel; PRIVMSG events start flowing on the stream afterwards.
    pub fn join(&self, channel: &str) -> Result<(), BotError> {
        self.client
            .join(channel.to_string())
            .map_err(|e| BotError::Irc(e.to_string()))
    }

    /// Converts a PRIVMSG into the domain message type.
    pub fn to_chat_message(msg: &PrivmsgMessage) -> ChatMessage {
        ChatMessage::new(
            msg.channel_login.as_str(),
            msg.sender.login.as_str(),
            msg.message_text.as_str(),
        )
        .with_id(msg.message_id.as_str())
        .with_timestamp(msg.server_timestamp)
    }
}

#[async_trait]
impl Chat for TwitchAdapter {
    async fn say(&self, channel: &str, text: &str) -> Result<(), BotError> {
        self.client
            .say(channel.to_string(), text.to_string())
            .await
            .map_err(|e| BotError::Irc(e.to_string()))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
