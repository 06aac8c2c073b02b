// Terminal view of the whitelist session
//
// `UiState` drives which single prompt is shown, the same way the page
// swaps its button: connect, join, loading, or a thank-you note.

use crossterm::style::Stylize;
use std::io::IsTerminal;

use crate::session::UiState;

const TITLE: &str = "Welcome to Crypto Devs!";
const DESCRIPTION: &str = "Its an NFT collection for developers in Crypto.";

/// Blocking, user-facing notice (the page's `window.alert`).
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr, highlighted when stderr is a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAlert;

impl Alert for TerminalAlert {
    fn alert(&self, message: &str) {
        eprintln!("{}", alert_line(message, std::io::stderr().is_terminal()));
    }
}

fn alert_line(message: &str, styled: bool) -> String {
    if styled {
        format!("{} {}", "⚠".yellow().bold(), message.to_string().yellow().bold())
    } else {
        format!("ALERT: {}", message)
    }
}

/// Which call to action the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// No wallet session yet
    ConnectWallet,
    /// Connected, not a member, nothing pending
    JoinWhitelist,
    /// Join transaction submitted, waiting for it to be mined
    Loading,
    /// Connected and a member
    Joined,
}

impl Prompt {
    pub fn for_state(state: &UiState) -> Self {
        if !state.wallet_connected {
            Prompt::ConnectWallet
        } else if state.joined_whitelist {
            Prompt::Joined
        } else if state.loading {
            Prompt::Loading
        } else {
            Prompt::JoinWhitelist
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Prompt::ConnectWallet => "Connect your wallet to join the whitelist  (whitelist status)",
            Prompt::JoinWhitelist => "Join the whitelist  (whitelist join)",
            Prompt::Loading => "Loading...",
            Prompt::Joined => "Thanks for joining the whitelist!",
        }
    }
}

/// Render the full view as plain text.
pub fn render(state: &UiState) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(DESCRIPTION);
    out.push('\n');

    match state.max_whitelisted {
        Some(max) => out.push_str(&format!(
            "{}/{} have already joined the Whitelist\n",
            state.num_whitelisted, max
        )),
        None => out.push_str(&format!(
            "{} have already joined the Whitelist\n",
            state.num_whitelisted
        )),
    }

    out.push('\n');
    out.push_str(Prompt::for_state(state).text());
    out.push('\n');
    out
}
