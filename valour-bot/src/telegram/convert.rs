use valour_shared::clients::telegram::{Update, User};

use crate::input::{Choice, Inbound, Input, Sender};

fn sender(user: User) -> Sender {
    Sender { id: user.id, first_name: user.first_name, username: user.username }
}

/// Turn a Telegram update into an inbound event. Updates from bots or
/// without a sender are dropped.
pub fn to_inbound(update: Update) -> Option<Inbound> {
    if let Some(query) = update.callback_query {
        if query.from.is_bot {
            return None;
        }
        let input = query
            .data
            .as_deref()
            .and_then(Choice::from_callback)
            .map_or(Input::Unsupported, Input::Choice);
        return Some(Inbound { sender: sender(query.from), input, callback_id: Some(query.id) });
    }

    let message = update.message?;
    let input = if let Some(photo) = message.largest_photo() {
        Input::Photo(photo.to_string())
    } else if let Some(text) = message.text.as_deref() {
        Input::from_text(text)
    } else {
        Input::Unsupported
    };

    let from = message.from?;
    if from.is_bot {
        return None;
    }
    Some(Inbound { sender: sender(from), input, callback_id: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Command;
    use crate::models::Gender;

    fn update(json: serde_json::Value) -> Update {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn text_message_becomes_command_or_text() {
        let u = update(serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "from": { "id": 7, "is_bot": false, "first_name": "Al", "username": "al" },
                "chat": { "id": 7 },
                "text": "/start"
            }
        }));
        let inbound = to_inbound(u).unwrap();
        assert_eq!(inbound.sender.id, 7);
        assert_eq!(inbound.sender.username.as_deref(), Some("al"));
        assert_eq!(inbound.input, Input::Command(Command::Start));
        assert_eq!(inbound.callback_id, None);
    }

    #[test]
    fn photo_message_uses_largest_size() {
        let u = update(serde_json::json!({
            "update_id": 2,
            "message": {
                "message_id": 2,
                "from": { "id": 7, "is_bot": false, "first_name": "Al" },
                "chat": { "id": 7 },
                "caption": "me",
                "photo": [
                    { "file_id": "small", "width": 90, "height": 90 },
                    { "file_id": "large", "width": 800, "height": 800 }
                ]
            }
        }));
        assert_eq!(to_inbound(u).unwrap().input, Input::Photo("large".into()));
    }

    #[test]
    fn callback_query_becomes_choice() {
        let u = update(serde_json::json!({
            "update_id": 3,
            "callback_query": {
                "id": "cb9",
                "from": { "id": 8, "is_bot": false, "first_name": "Bo" },
                "data": "gender:Female"
            }
        }));
        let inbound = to_inbound(u).unwrap();
        assert_eq!(inbound.input, Input::Choice(Choice::Gender(Gender::Female)));
        assert_eq!(inbound.callback_id.as_deref(), Some("cb9"));
    }

    #[test]
    fn unknown_callbacks_and_stickers_are_unsupported() {
        let cb = update(serde_json::json!({
            "update_id": 4,
            "callback_query": { "id": "x", "from": { "id": 8, "first_name": "Bo" }, "data": "nonsense" }
        }));
        assert_eq!(to_inbound(cb).unwrap().input, Input::Unsupported);

        let sticker = update(serde_json::json!({
            "update_id": 5,
            "message": { "message_id": 3, "from": { "id": 8, "first_name": "Bo" }, "chat": { "id": 8 } }
        }));
        assert_eq!(to_inbound(sticker).unwrap().input, Input::Unsupported);
    }

    #[test]
    fn bots_and_anonymous_messages_are_dropped() {
        let from_bot = update(serde_json::json!({
            "update_id": 6,
            "message": {
                "message_id": 4,
                "from": { "id": 9, "is_bot": true, "first_name": "Bot" },
                "chat": { "id": 9 },
                "text": "hi"
            }
        }));
        assert!(to_inbound(from_bot).is_none());

        let anonymous = update(serde_json::json!({
            "update_id": 7,
            "message": { "message_id": 5, "chat": { "id": -100 }, "text": "hi" }
        }));
        assert!(to_inbound(anonymous).is_none());
        assert!(to_inbound(update(serde_json::json!({ "update_id": 8 }))).is_none());
    }
}
