use valour_shared::clients::telegram::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup, ReplyKeyboardRemove,
    ReplyMarkup,
};

use crate::bot::Keyboard;
use crate::input::{Choice, MenuAction, KEEP_CURRENT_LABEL};
use crate::matching::SwipeAction;
use crate::models::Gender;

pub fn reply_markup(keyboard: Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Menu => menu(),
        Keyboard::Genders => inline(vec![gender_row()]),
        Keyboard::GendersOrKeep => inline(vec![gender_row(), vec![keep_button()]]),
        Keyboard::KeepCurrent => inline(vec![vec![keep_button()]]),
        Keyboard::Swipe => inline(vec![
            vec![swipe_button(SwipeAction::Like), swipe_button(SwipeAction::Skip)],
            vec![swipe_button(SwipeAction::Stop)],
        ]),
        Keyboard::Remove => ReplyMarkup::Remove(ReplyKeyboardRemove { remove_keyboard: true }),
    }
}

fn menu() -> ReplyMarkup {
    let keyboard = MenuAction::ALL
        .chunks(2)
        .map(|row| row.iter().map(|a| KeyboardButton { text: a.label().to_string() }).collect())
        .collect();

    ReplyMarkup::Keyboard(ReplyKeyboardMarkup { keyboard, resize_keyboard: true, one_time_keyboard: false })
}

fn inline(rows: Vec<Vec<InlineKeyboardButton>>) -> ReplyMarkup {
    ReplyMarkup::Inline(InlineKeyboardMarkup { inline_keyboard: rows })
}

fn button(text: &str, choice: Choice) -> InlineKeyboardButton {
    InlineKeyboardButton { text: text.to_string(), callback_data: choice.callback_data() }
}

fn gender_row() -> Vec<InlineKeyboardButton> {
    Gender::ALL.iter().map(|g| button(g.as_str(), Choice::Gender(*g))).collect()
}

fn keep_button() -> InlineKeyboardButton {
    button(KEEP_CURRENT_LABEL, Choice::KeepCurrent)
}

fn swipe_button(action: SwipeAction) -> InlineKeyboardButton {
    button(action.label(), Choice::Swipe(action))
}
