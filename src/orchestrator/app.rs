//! Terminal front end
//!
//! Owns the wizard and the services, reads commands from stdin and redraws
//! the current view after every change. Prediction and roadmap requests run
//! as spawned tasks and report back over a channel, so the prompt stays
//! responsive while they are in flight.

use anyhow::Result;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clients::HealthClient;
use crate::config::Config;
use crate::error::{AppResult, FileError};
use crate::models::{load_catalog_file, Catalog};
use crate::render::views;
use crate::services::{PredictionService, RoadmapService};
use crate::utils::logging::log_startup;
use crate::workflow::{PredictionOutcome, RoadmapTicket, Wizard, WizardStep};

/// Finished request on its way back to the wizard
#[derive(Debug)]
pub enum AppEvent {
    Predicted {
        submission: u64,
        outcome: PredictionOutcome,
    },
    RoadmapReady {
        ticket: RoadmapTicket,
        result: Result<String, String>,
    },
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Branch by number or name
    Branch(String),
    /// Flip subjects by number or name
    Toggle(Vec<String>),
    /// Advance from the current step
    Next,
    /// Back to a step number
    Back(u8),
    /// Subject key and raw mark text
    Mark { key: String, value: String },
    Submit,
    /// 1-based card numbers
    Roadmap(Vec<usize>),
    Show,
    Restart,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  branch <n|name>          choose a branch
  toggle <n|name> ...      check or uncheck subjects
  next                     continue to the next step
  back <step>              return to an earlier step
  mark <n|name> <value>    enter a mark (0-100)
  submit                   analyze the marks
  roadmap <card> ...       generate career paths for result cards
  show | restart | help | quit";

/// Parses one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Show);
    };
    let rest: Vec<&str> = words.collect();

    match head.to_ascii_lowercase().as_str() {
        "branch" | "b" if rest.is_empty() => Err("usage: branch <n|name>".to_string()),
        "branch" | "b" => Ok(Command::Branch(rest.join(" "))),
        "toggle" | "t" if rest.is_empty() => Err("usage: toggle <n|name> ...".to_string()),
        "toggle" | "t" => Ok(Command::Toggle(split_keys(&rest))),
        "next" | "n" => Ok(Command::Next),
        "back" => {
            let step = rest
                .first()
                .and_then(|s| s.parse::<u8>().ok())
                .ok_or("usage: back <step number>")?;
            Ok(Command::Back(step))
        }
        "mark" | "m" => match rest.split_last() {
            None => Err("usage: mark <n|name> <value>".to_string()),
            Some((only, [])) => Ok(Command::Mark {
                key: only.to_string(),
                value: String::new(),
            }),
            Some((value, key)) => Ok(Command::Mark {
                key: key.join(" "),
                value: value.to_string(),
            }),
        },
        "submit" | "s" => Ok(Command::Submit),
        "roadmap" | "r" => {
            let cards = rest
                .iter()
                .map(|s| s.parse::<usize>().ok().filter(|n| *n > 0))
                .collect::<Option<Vec<_>>>()
                .filter(|cards| !cards.is_empty())
                .ok_or("usage: roadmap <card number> ...")?;
            Ok(Command::Roadmap(cards))
        }
        "show" => Ok(Command::Show),
        "restart" => Ok(Command::Restart),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Numbers stay separate; consecutive words form one subject name
fn split_keys(words: &[&str]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut name: Vec<&str> = Vec::new();
    for word in words {
        if word.parse::<usize>().is_ok() {
            if !name.is_empty() {
                keys.push(name.join(" "));
                name.clear();
            }
            keys.push(word.to_string());
        } else {
            name.push(word);
        }
    }
    if !name.is_empty() {
        keys.push(name.join(" "));
    }
    keys
}

/// Resolves a 1-based number or a case-insensitive name against `items`
fn resolve_key<'a>(key: &str, items: &[&'a str]) -> Option<&'a str> {
    match key.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| items.get(i)).copied(),
        Err(_) => items.iter().find(|item| item.eq_ignore_ascii_case(key)).copied(),
    }
}

/// Application
pub struct App {
    config: Config,
    wizard: Wizard,
    predictions: PredictionService,
    roadmaps: RoadmapService,
}

impl App {
    /// Loads the catalog and probes the service
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        config.warn_suspicious();

        let catalog = match &config.catalog_file {
            Some(path) => {
                let catalog = load_catalog_file(Path::new(path)).await?;
                info!("📚 Loaded catalog from {}", path);
                catalog
            }
            None => Catalog::builtin(config.catalog_mode),
        };

        if config.check_health {
            HealthClient::new(&config).probe().await;
        }

        Ok(Self {
            predictions: PredictionService::new(&config),
            roadmaps: RoadmapService::new(&config),
            wizard: Wizard::new(catalog),
            config,
        })
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Interactive loop; ends on `quit` or end of input
    pub async fn run(mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.wizard.start();
        println!("{}\n", HELP);
        self.show();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match parse_command(&line) {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.execute(command, &tx),
                        Err(message) => println!("{}", message),
                    }
                }
                Some(event) = rx.recv() => self.handle_event(event).await,
            }
        }

        info!("👋 Bye");
        Ok(())
    }

    /// Applies one command and redraws; network work is spawned onto `tx`
    pub fn execute(&mut self, command: Command, tx: &mpsc::UnboundedSender<AppEvent>) {
        debug!("Command: {:?}", command);

        let outcome = match command {
            Command::Branch(key) => {
                let catalog = self.wizard.catalog();
                let branch = catalog
                    .find_branch(&key)
                    .or_else(|| resolve_key(&key, &catalog.branch_names()))
                    .unwrap_or(key.as_str())
                    .to_string();
                self.wizard.select_branch(&branch).map_err(|e| e.to_string())
            }
            Command::Toggle(keys) => self.toggle(&keys),
            Command::Next => match self.wizard.step() {
                WizardStep::SubjectSelect => {
                    self.wizard.proceed_to_marks().map_err(|e| e.to_string())
                }
                WizardStep::MarksEntry => self.submit(tx),
                WizardStep::BranchSelect => Err("Choose a branch first.".to_string()),
                WizardStep::Results => Err("Already at the results.".to_string()),
            },
            Command::Back(n) => match WizardStep::from_number(n) {
                Some(step) => self.wizard.go_back(step).map_err(|e| e.to_string()),
                None => Err(format!("no step {}", n)),
            },
            Command::Mark { key, value } => {
                let subjects: Vec<&str> = self
                    .wizard
                    .mark_inputs()
                    .iter()
                    .map(|m| m.subject.as_str())
                    .collect();
                let subject = resolve_key(&key, &subjects).unwrap_or(key.as_str()).to_string();
                self.wizard
                    .set_mark(&subject, &value)
                    .map_err(|e| e.to_string())
            }
            Command::Submit => {
                if self.wizard.step() == WizardStep::MarksEntry {
                    self.submit(tx)
                } else {
                    Err(format!("Nothing to submit at the {} step.", self.wizard.step()))
                }
            }
            Command::Roadmap(cards) => self.spawn_roadmaps(&cards, tx),
            Command::Restart => {
                self.wizard.restart();
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Show | Command::Quit => Ok(()),
        };

        if let Err(message) = outcome {
            println!("⚠️ {}", message);
        }
        self.show();
    }

    fn toggle(&mut self, keys: &[String]) -> Result<(), String> {
        for key in keys {
            let (subject, checked) = {
                let subjects: Vec<&str> = self
                    .wizard
                    .toggles()
                    .iter()
                    .map(|t| t.subject.as_str())
                    .collect();
                let subject = resolve_key(key, &subjects).unwrap_or(key.as_str()).to_string();
                let checked = self.wizard.session().is_selected(&subject);
                (subject, checked)
            };
            self.wizard
                .toggle_subject(&subject, !checked)
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    fn submit(&mut self, tx: &mpsc::UnboundedSender<AppEvent>) -> Result<(), String> {
        let request = self.wizard.submit_marks().map_err(|e| e.to_string())?;
        let submission = self.wizard.submission();

        let service = self.predictions.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = service.predict(&request).await;
            let _ = tx.send(AppEvent::Predicted { submission, outcome });
        });
        Ok(())
    }

    /// Lands a finished request; stale replies are dropped by the wizard
    pub async fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Predicted { submission, outcome } => {
                if self.wizard.apply_prediction(submission, outcome) {
                    self.show();
                    self.write_report().await;
                }
            }
            AppEvent::RoadmapReady { ticket, result } => {
                if self.land_roadmap(&ticket, result) {
                    self.show();
                    self.write_report().await;
                }
            }
        }
    }

    fn spawn_roadmaps(
        &mut self,
        cards: &[usize],
        tx: &mpsc::UnboundedSender<AppEvent>,
    ) -> Result<(), String> {
        let board = self
            .wizard
            .board_mut()
            .ok_or("There are no result cards yet.")?;

        let mut errors = Vec::new();
        for &card in cards {
            let Some(index) = card.checked_sub(1) else {
                errors.push(format!("no card {}", card));
                continue;
            };
            match board.begin_roadmap(index) {
                Ok(ticket) => {
                    let service = self.roadmaps.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = service.fetch(&ticket).await;
                        let _ = tx.send(AppEvent::RoadmapReady { ticket, result });
                    });
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    fn land_roadmap(&mut self, ticket: &RoadmapTicket, result: Result<String, String>) -> bool {
        let landed = self
            .wizard
            .board_mut()
            .map(|board| board.finish_roadmap(ticket, result))
            .unwrap_or(false);

        if landed {
            info!("🗺️ Roadmap ready for card {} ({})", ticket.index + 1, ticket.role);
        } else {
            debug!("Dropped roadmap reply for submission {}", ticket.submission);
        }
        landed
    }

    fn show(&self) {
        println!("\n{}\n", views::page(&self.wizard).to_text());
    }

    fn report_html(&self) -> String {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        views::report_document(&self.wizard, &generated_at)
    }

    async fn write_report(&self) {
        if let Some(path) = &self.config.report_file {
            match save_report(path, &self.report_html()).await {
                Ok(()) => info!("📝 Results written to {}", path),
                Err(e) => warn!("⚠️ {}", e),
            }
        }
    }
}

async fn save_report(path: &str, html: &str) -> AppResult<()> {
    tokio::fs::write(path, html)
        .await
        .map_err(|e| FileError::write_failed(path, e))?;
    Ok(())
}
