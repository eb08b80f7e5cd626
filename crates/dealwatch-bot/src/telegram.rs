//! Telegram command dispatcher.

use dealwatch_core::ChatId;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::commands::CommandLayer;

/// Bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandi disponibili:")]
pub enum Command {
    #[command(description = "Mostra le istruzioni")]
    Start,
    #[command(description = "Imposta l'intervallo in secondi. Uso: /setinterval 600")]
    SetInterval(String),
    #[command(description = "Avvia il controllo delle offerte")]
    Run,
    #[command(description = "Ferma il controllo delle offerte")]
    Stop,
    #[command(description = "Mostra questo messaggio")]
    Help,
}

/// Maps a parsed command to its reply text.
#[must_use]
pub fn reply_for(layer: &CommandLayer, chat_id: ChatId, cmd: Command) -> String {
    match cmd {
        Command::Start => layer.welcome(),
        Command::SetInterval(raw) => layer.set_interval(&raw),
        Command::Run => layer.start(chat_id),
        Command::Stop => layer.stop(chat_id),
        Command::Help => Command::descriptions().to_string(),
    }
}

/// Runs the long-polling dispatcher until Ctrl-C.
pub async fn run(bot: Bot, layer: CommandLayer) {
    let handler = Update::filter_message().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let layer = layer.clone();
            async move {
                let chat_id = ChatId(msg.chat.id.0);
                tracing::info!(%chat_id, command = ?cmd, "telegram: command received");
                let reply = reply_for(&layer, chat_id, cmd);
                bot.send_message(msg.chat.id, reply).await?;
                Ok::<(), teloxide::RequestError>(())
            }
        },
    );

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
