//! System status dashboard command.

use anyhow::Result;
use console::style;

use chatdesk_core::chat::repository::ChatRepository;
use chatdesk_core::repository::user::UserRepository;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows account and chat counts, the data directory, and version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let users = state.account.user_repo().count_users().await?;
    let sessions = state.chat.chat_repo().count_sessions().await?;
    let messages = state.chat.chat_repo().count_all_messages().await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "users": users,
            "sessions": sessions,
            "messages": messages,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Chatdesk v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Accounts ──").dim());
    println!("  Users:    {}", style(users).bold());
    println!();

    println!("  {}", style("── Chat ──").dim());
    println!("  Sessions: {}", style(sessions).bold());
    println!("  Messages: {}", style(messages).bold());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
