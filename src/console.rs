// console.rs

use crate::advisor::Advisor;
use crate::formatter::{format_details, format_faqs, format_list};
use crate::model::FilterCriteria;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "📋 Available commands:\n\
    /top [n] - first colleges in the catalog\n\
    /search location=.. course=.. budget=.. sort=rank|fee|name q=..\n\
    /college <id> - details of one college\n\
    /faq - frequently asked questions\n\
    /health - service status\n\
    /reload - reload data files\n\
    /lang <code>|auto - reply language for chat\n\
    /help - this list\n\
    /quit - exit\n\
Anything else is sent to the chat assistant.";

/// Per-console state carried between lines.
#[derive(Debug, Default)]
pub struct Session {
    pub language: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum Action {
    Reply(String),
    Quit,
}

/// Handles one input line and returns what to print.
pub async fn handle_line(advisor: &Advisor, session: &mut Session, line: &str) -> Action {
    let line = line.trim();
    if line.is_empty() {
        return Action::Reply(String::new());
    }
    if !line.starts_with('/') {
        return Action::Reply(chat(advisor, session, line).await);
    }

    let (command, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let args = args.trim();
    info!("Handling command: {}", command);
    let reply = match command {
        "/quit" | "/exit" => return Action::Quit,
        "/help" => HELP.to_string(),
        "/top" => {
            let n = args.parse::<usize>().unwrap_or_else(|_| advisor.top_limit());
            format_list(&advisor.list_top(n))
        }
        "/search" => advisor.search(&parse_search(args)).await.text,
        "/college" => match args.parse::<i64>() {
            Ok(id) => match advisor.college(id) {
                Ok(record) => format_details(&record),
                Err(e) => format!("❌ {}", e),
            },
            Err(_) => "❌ Usage: /college <id>".to_string(),
        },
        "/faq" => format_faqs(&advisor.faqs()),
        "/health" => serde_json::to_string_pretty(&advisor.health())
            .unwrap_or_else(|e| format!("❌ Error: {}", e)),
        "/reload" => match advisor.reload() {
            Ok(count) => format!("🔄 Reloaded {} colleges.", count),
            Err(e) => format!("❌ {}", e),
        },
        "/lang" => set_language(session, args),
        _ => "🤖 Unknown command. Type /help for a list of commands.".to_string(),
    };
    Action::Reply(reply)
}

async fn chat(advisor: &Advisor, session: &Session, message: &str) -> String {
    match advisor.chat(message, session.language.as_deref()).await {
        Ok(reply) => reply.response,
        Err(e) => format!("❌ {}", e),
    }
}

fn set_language(session: &mut Session, args: &str) -> String {
    match args.to_lowercase().as_str() {
        "" => format!(
            "🌐 Language: {}",
            session.language.as_deref().unwrap_or("auto")
        ),
        "auto" => {
            session.language = None;
            "🌐 Language detection is automatic.".to_string()
        }
        code => {
            session.language = Some(code.to_string());
            format!("🌐 Replies will use '{}'.", code)
        }
    }
}

/// Parses `key=value` pairs; words without `=` extend the previous value,
/// so `location=Tamil Nadu` keeps both words.
pub fn parse_search(args: &str) -> FilterCriteria {
    let mut fields: Vec<(String, String)> = Vec::new();
    for word in args.split_whitespace() {
        match word.split_once('=') {
            Some((key, value)) => fields.push((key.to_lowercase(), value.to_string())),
            None => {
                if let Some((_, value)) = fields.last_mut() {
                    value.push(' ');
                    value.push_str(word);
                }
            }
        }
    }

    let get = |key: &str| {
        fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    };
    FilterCriteria::from_raw(get("location"), get("course"), get("budget"), get("sort"), get("q"))
}

/// Reads stdin line by line until EOF or `/quit`.
pub async fn run(advisor: &Advisor) {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut session = Session::default();

    loop {
        if let Err(e) = write_out(&mut stdout, "> ").await {
            warn!("Console write failed: {}", e);
            return;
        }
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Console read failed: {}", e);
                break;
            }
        };

        match handle_line(advisor, &mut session, &line).await {
            Action::Quit => break,
            Action::Reply(text) if text.is_empty() => {}
            Action::Reply(text) => {
                if let Err(e) = write_out(&mut stdout, &format!("{}\n", text)).await {
                    warn!("Console write failed: {}", e);
                    return;
                }
            }
        }
    }
    info!("🛑 Console closed.");
}

async fn write_out(stdout: &mut io::Stdout, text: &str) -> io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await
}
