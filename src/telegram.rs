//! Telegram transport (teloxide long polling).

use std::sync::Arc;

use teloxide::{
    dispatching::Dispatcher,
    dptree,
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};
use tokio::sync::Mutex;
use tracing::info;

use crate::bot::{ChatHandler, IncomingMessage, Keyboard, Reply, Sender};
use crate::domain::Profile;

/// One handler for the whole bot: the lock makes updates from all chats
/// take turns, so dialogue state is only ever touched by one message.
pub type SharedHandler = Arc<Mutex<ChatHandler>>;

pub async fn run_polling(token: String, handler: ChatHandler) -> anyhow::Result<()> {
    let bot = Bot::new(token);
    if let Ok(me) = bot.get_me().await {
        info!(username = %me.username(), "bot started, waiting for messages");
    }

    let handler: SharedHandler = Arc::new(Mutex::new(handler));
    let schema = dptree::entry().branch(Update::filter_message().endpoint(on_message));

    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler])
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(bot: Bot, msg: Message, handler: SharedHandler) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let sender = Sender::new(user.id.0 as i64).with_profile(Profile {
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
    });
    let incoming = IncomingMessage::new(sender, text);

    let reply = handler.lock().await.handle(&incoming).await;
    send_reply(&bot, msg.chat.id, reply).await
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    let request = bot.send_message(chat_id, reply.text);
    match reply.keyboard {
        Some(keyboard) => request.reply_markup(to_markup(keyboard)).await?,
        None => request.await?,
    };
    Ok(())
}

fn to_markup(keyboard: Keyboard) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = keyboard
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect())
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard(true)
}
