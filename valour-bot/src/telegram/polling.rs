use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinSet;

use valour_shared::clients::telegram::{TelegramClient, Update};

use crate::bot::Bot;
use crate::input::{Inbound, UserId};
use crate::telegram::convert;

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Split a batch into per-user queues, keeping each user's order, and
/// return the offset that acknowledges the whole batch.
pub fn group_by_sender(updates: Vec<Update>, offset: i64) -> (i64, Vec<Vec<Inbound>>) {
    let mut next_offset = offset;
    let mut order: Vec<UserId> = Vec::new();
    let mut queues: HashMap<UserId, Vec<Inbound>> = HashMap::new();

    for update in updates {
        next_offset = next_offset.max(update.update_id + 1);
        let Some(inbound) = convert::to_inbound(update) else {
            continue;
        };
        let user_id = inbound.sender.id;
        queues
            .entry(user_id)
            .or_insert_with(|| {
                order.push(user_id);
                Vec::new()
            })
            .push(inbound);
    }

    let grouped = order.into_iter().filter_map(|id| queues.remove(&id)).collect();
    (next_offset, grouped)
}

/// Long-poll Telegram forever. Different users are served concurrently;
/// one user's updates run in arrival order.
pub async fn run_polling(bot: Bot, client: TelegramClient, timeout_secs: u64) {
    if let Err(e) = client.delete_webhook().await {
        tracing::warn!(error = %e, "could not remove webhook before polling");
    }
    tracing::info!(timeout_secs, "polling for telegram updates");

    let mut offset = 0;
    loop {
        let updates = match client.get_updates(offset, timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        let (next_offset, queues) = group_by_sender(updates, offset);
        offset = next_offset;

        let mut tasks = JoinSet::new();
        for queue in queues {
            let bot = bot.clone();
            tasks.spawn(async move {
                for inbound in queue {
                    bot.handle(inbound).await;
                }
            });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "update task failed");
            }
        }
    }
}
