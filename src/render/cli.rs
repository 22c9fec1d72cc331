//! Terminal frontend — drives a full conversation over stdin/stdout.
//!
//! This is the render adapter in its simplest form: it shows newly appended
//! transcript entries, presents the affordance the adapter decides on, and
//! routes replies back into the session. Pacing between a submission and the
//! next bot messages is applied here, never in the interpreter.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::booking::catalog::Barber;
use crate::config::UiConfig;
use crate::flow::{ConversationSession, Flow, Sender};
use crate::pickers::{BarberPicker, BookedTimesSource, DayTimePicker};
use crate::render::adapter::{Affordance, affordance};

type InputLines = Lines<BufReader<Stdin>>;

/// Runs a scripted conversation in the terminal.
pub struct CliRunner {
    config: UiConfig,
    source: Arc<dyn BookedTimesSource>,
    roster: Vec<Barber>,
}

impl CliRunner {
    pub fn new(config: UiConfig, source: Arc<dyn BookedTimesSource>, roster: Vec<Barber>) -> Self {
        Self {
            config,
            source,
            roster,
        }
    }

    /// Run the given flow to completion.
    pub async fn run(&self, flow: Arc<Flow>, shop_name: &str) -> anyhow::Result<()> {
        let mut session = ConversationSession::start(flow, shop_name);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut printed = 0;

        loop {
            printed = self.print_new_entries(&session, printed);
            match affordance(&session) {
                Affordance::None => break,
                Affordance::Advance => session.resume(),
                Affordance::TextInput => {
                    let text = self
                        .read_reply(&mut lines, &self.config.text_placeholder)
                        .await?;
                    session.submit_text(&text);
                    tokio::time::sleep(self.config.text_pacing).await;
                }
                Affordance::Options(options) => {
                    for (i, option) in options.iter().enumerate() {
                        println!("  {}. {}", i + 1, option.text);
                    }
                    let choice = self.read_index(&mut lines, options.len()).await?;
                    let option = &options[choice];
                    session.submit_option(&option.value, &option.text);
                    tokio::time::sleep(self.config.option_pacing).await;
                }
                Affordance::DateTimePicker => {
                    let (message, value) = self.pick_slot(&mut lines).await?;
                    session.submit_widget(&message, &value);
                    tokio::time::sleep(self.config.option_pacing).await;
                }
                Affordance::BarberPicker => {
                    let (message, value) = self.pick_barber(&mut lines).await?;
                    session.submit_widget(&message, &value);
                    tokio::time::sleep(self.config.option_pacing).await;
                }
            }
        }

        tracing::info!(session = %session.id(), "Conversation finished");
        Ok(())
    }

    fn print_new_entries(&self, session: &ConversationSession, printed: usize) -> usize {
        let entries = session.transcript().entries();
        for entry in &entries[printed..] {
            match entry.sender {
                Sender::Bot => println!("🤖 {}", entry.text),
                Sender::User => println!("   › {}", entry.text),
            }
        }
        entries.len()
    }

    /// Read one non-empty line. Empty input is rejected here, at the
    /// frontend; the interpreter never sees it.
    async fn read_reply(&self, lines: &mut InputLines, prompt: &str) -> anyhow::Result<String> {
        loop {
            eprint!("{prompt} > ");
            match lines.next_line().await? {
                Some(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    return Ok(line);
                }
                None => anyhow::bail!("stdin closed before the conversation finished"),
            }
        }
    }

    /// Read a 1-based menu choice, returning the 0-based index.
    async fn read_index(&self, lines: &mut InputLines, len: usize) -> anyhow::Result<usize> {
        loop {
            let reply = self.read_reply(lines, "Escolha uma opção (número)").await?;
            match reply.parse::<usize>() {
                Ok(n) if (1..=len).contains(&n) => return Ok(n - 1),
                _ => eprintln!("⚠️  Digite um número entre 1 e {len}"),
            }
        }
    }

    /// Interactive date/time widget. Returns (chat message, slot value).
    async fn pick_slot(&self, lines: &mut InputLines) -> anyhow::Result<(String, String)> {
        let mut picker = DayTimePicker::new();
        loop {
            let reply = self.read_reply(lines, "Data (dd/mm/aaaa)").await?;
            let date = match chrono::NaiveDate::parse_from_str(&reply, "%d/%m/%Y") {
                Ok(date) => date,
                Err(_) => {
                    eprintln!("⚠️  Data inválida; use o formato dd/mm/aaaa");
                    continue;
                }
            };

            picker.select_date(date, self.source.as_ref()).await;
            let available = picker.available_times();
            if available.is_empty() {
                eprintln!("⚠️  Nenhum horário livre nesse dia; escolha outra data");
                continue;
            }

            println!("Horários disponíveis:");
            for (i, time) in available.iter().enumerate() {
                println!("  {}. {}", i + 1, time);
            }
            let choice = self.read_index(lines, available.len()).await?;
            picker.select_time(&available[choice]);
            let confirmed = picker.confirm()?;
            return Ok((confirmed.message.clone(), confirmed.message));
        }
    }

    /// Interactive barber widget. Returns (chat message, slot value).
    async fn pick_barber(&self, lines: &mut InputLines) -> anyhow::Result<(String, String)> {
        let mut picker = BarberPicker::new(self.roster.clone());
        for (i, barber) in picker.roster().iter().enumerate() {
            println!("  {}. {} ({})", i + 1, barber.name, barber.bio);
        }
        let choice = self.read_index(lines, picker.roster().len()).await?;
        let id = picker.roster()[choice].id.clone();
        picker.select(&id);
        let (barber, message) = picker.confirm()?;
        Ok((message, barber.name))
    }
}
