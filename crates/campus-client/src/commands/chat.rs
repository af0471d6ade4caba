use campus_shared::constants::GUEST_USER_ID;
use campus_store::{Chat, Message};
use tracing::info;

use super::lock;
use crate::state::{AppState, SharedState};

fn participant_id(guard: &AppState) -> String {
    guard
        .marketplace
        .user()
        .map(|u| u.id.clone())
        .unwrap_or_else(|| GUEST_USER_ID.to_string())
}

/// Open (or reopen) the chat with a product's seller.  The current user (or
/// the guest id) is the first participant, the seller the second.
pub fn open_chat(state: &SharedState, product_id: &str) -> Result<Chat, String> {
    let mut guard = lock(state)?;

    let seller_id = guard
        .marketplace
        .find_product(product_id)
        .map(|p| p.seller_id.clone())
        .ok_or_else(|| "Product not found".to_string())?;
    let me = participant_id(&guard);

    let chat = guard
        .marketplace
        .add_chat_if_missing(product_id, [me.as_str(), seller_id.as_str()]);

    info!(chat_id = %chat.id, product_id, "Chat opened");
    Ok(chat)
}

pub fn get_chat(state: &SharedState, chat_id: &str) -> Result<Chat, String> {
    let guard = lock(state)?;
    guard
        .marketplace
        .find_chat(chat_id)
        .cloned()
        .ok_or_else(|| "Chat not found".to_string())
}

/// Send a message as the current user (or guest).
pub fn send_chat_message(state: &SharedState, chat_id: &str, text: &str) -> Result<Message, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Message is empty".into());
    }

    let mut guard = lock(state)?;
    let me = participant_id(&guard);

    guard
        .marketplace
        .push_message(chat_id, &me, text)
        .ok_or_else(|| "Chat not found".to_string())
}

/// Chats the current user (or guest) takes part in.
pub fn list_chats(state: &SharedState) -> Result<Vec<Chat>, String> {
    let guard = lock(state)?;
    let me = participant_id(&guard);
    Ok(guard
        .marketplace
        .chats_for_user(&me)
        .into_iter()
        .cloned()
        .collect())
}
