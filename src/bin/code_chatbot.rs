//! Code Chatbot CLI
//!
//! Ask questions about a Java snippet from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # One question against a file
//! cargo run --features cli --bin code_chatbot -- \
//!   --code coverity_test/src/main/java/com/example/Calculator.java \
//!   --question "please review this code"
//!
//! # Interactive: one question per line on stdin
//! CHATBOT_BACKEND=codellama cargo run --features cli --bin code_chatbot -- --snippet "class A {}"
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use code_chatbot::testgen::read_code;
use code_chatbot::{ChatbotConfig, CodeChatbot, Conversation, ModelBackend, SessionState};

#[derive(Parser, Debug)]
#[command(name = "code_chatbot", about = "Ask an LLM about a piece of code")]
struct Args {
    /// Read the snippet from this file
    #[arg(long, conflicts_with = "snippet")]
    code: Option<PathBuf>,

    /// Use this text as the snippet
    #[arg(long)]
    snippet: Option<String>,

    /// Backend: gpt, llama, codellama
    #[arg(long, env = "CHATBOT_BACKEND")]
    backend: Option<String>,

    /// YAML config file; environment variables are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ask a single question and exit
    #[arg(long, short)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let mut config = ChatbotConfig::from_yaml_file(path)?;
            if config.api_key.is_none() {
                config.api_key = std::env::var("OPENAI_API_KEY").ok();
            }
            config
        }
        None => ChatbotConfig::from_env()?,
    };
    if let Some(backend) = &args.backend {
        config.backend = backend.parse::<ModelBackend>()?;
    }

    let (code, uploaded) = match (&args.code, &args.snippet) {
        (Some(path), _) => (read_code(path)?, true),
        (None, Some(snippet)) => (snippet.clone(), false),
        (None, None) => return Err(anyhow!("Provide the code with --code <file> or --snippet <text>")),
    };
    if code.trim().is_empty() {
        return Err(anyhow!("Code snippet is empty"));
    }

    let chatbot = CodeChatbot::new(&config, SessionState::new(code, uploaded))
        .context("Failed to initialize chatbot")?;

    if let Some(question) = &args.question {
        let response = chatbot.invoke(question).await?;
        println!("{}", response.generation);
        return Ok(());
    }

    let mut history = Conversation::new();
    let stdin = io::stdin();
    print_prompt()?;
    for line in stdin.lock().lines() {
        let question = line?;
        let question = question.trim();
        if question.is_empty() {
            print_prompt()?;
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }

        match chatbot.converse(&history, question).await {
            Ok((response, next)) => {
                println!("{}\n", response.generation);
                history = next;
            }
            Err(e) => eprintln!("Error: {}\n", e),
        }
        print_prompt()?;
    }

    tracing::info!(turns = history.len(), "Conversation ended");
    Ok(())
}

fn print_prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
