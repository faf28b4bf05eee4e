//! User-facing reply texts. All replies are plain text.

pub const DENIED: &str = "⛔ This command is for the admin only!";
pub const SENDALL_USAGE: &str = "❗️ Write a message: /sendall [text]";
pub const INTERNAL_ERROR: &str = "⚠️ Something went wrong on our side. Please try again later.";

pub fn greeting(display_name: &str) -> String {
    format!(
        "👋 Hello, {}!\nI am a bot powered by Gemini AI.\nSend me your question!",
        display_name
    )
}

pub fn your_id(user_id: i64) -> String {
    format!("🆔 Your Telegram ID: {}", user_id)
}

pub fn user_count(count: usize) -> String {
    format!("👥 Registered users: {}", count)
}

pub fn broadcast_done(delivered: usize, total: usize) -> String {
    format!("✅ Delivered to {} of {} users.", delivered, total)
}
