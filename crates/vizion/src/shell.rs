// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vizion shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Plain lines are instructions for the selected provider; slash commands
//! drive style, preview, export and session control.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use strum::IntoEnumIterator;
use tracing::{debug, info};
use vizion_agent::{GenerationOrchestrator, ProviderStatus, QuickComponent, SubmitOutcome};
use vizion_config::VizionConfig;
use vizion_core::{
    ConversationEntry, FontFamily, HexColor, ProviderId, Role, SourceDocument, StyleSettings,
    VizionError,
};
use vizion_site::{Viewport, code_view, copy_snippet, export_document, preview_frame};

use crate::providers::build_registry;

const GREETING: &str =
    "Hi! I'm your AI website builder. What kind of website can I help you build today?";

/// File written into the temp directory by `/preview`.
const PREVIEW_FILE_NAME: &str = "vizion-preview.html";

/// A parsed line of shell input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Generate(String),
    Provider(Option<ProviderId>),
    Color(HexColor),
    Font(FontFamily),
    Quick(QuickComponent),
    Code,
    Snippet,
    Preview(Viewport),
    Export(Option<PathBuf>),
    History,
    New,
    Help,
    Quit,
}

/// Runs the `vizion shell` interactive REPL.
pub async fn run_shell(config: VizionConfig) -> Result<(), VizionError> {
    let orchestrator = GenerationOrchestrator::new(build_registry(&config));
    let style = config.style_settings();
    orchestrator.apply_style(&style).await;

    let mut shell = Shell {
        orchestrator,
        provider: config.app.default_provider,
        style,
        export_path: PathBuf::from(&config.app.export_path),
    };

    let mut rl = DefaultEditor::new()
        .map_err(|e| VizionError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "vizion shell".bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );
    println!("{} {GREETING}\n", "ai>".cyan());
    shell.report_provider();

    info!(provider = %shell.provider, "shell session started");

    loop {
        let prompt = format!("{}> ", shell.provider.to_string().green());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = shell.execute(command).await {
                            eprintln!("{}: {e}", "error".red());
                        }
                    }
                    Err(message) => eprintln!("{}", message.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

struct Shell {
    orchestrator: GenerationOrchestrator,
    provider: ProviderId,
    style: StyleSettings,
    export_path: PathBuf,
}

impl Shell {
    async fn execute(&mut self, command: Command) -> Result<(), VizionError> {
        match command {
            Command::Generate(instruction) => self.generate(&instruction).await,
            Command::Quick(component) => {
                println!("{} {}", "you>".dimmed(), component.instruction());
                self.generate(component.instruction()).await;
            }
            Command::Provider(None) => self.list_providers(),
            Command::Provider(Some(id)) => {
                self.provider = id;
                debug!(provider = %id, "provider selected");
                self.report_provider();
            }
            Command::Color(color) => {
                self.style.primary_color = color;
                self.restyle().await;
            }
            Command::Font(font) => {
                self.style.font_family = font;
                self.restyle().await;
            }
            Command::Code => println!("{}", code_view(&self.orchestrator.current().await)),
            Command::Snippet => println!("{}", copy_snippet(&self.orchestrator.current().await)),
            Command::Preview(viewport) => {
                let document = self.orchestrator.current().await;
                let path = write_preview(&std::env::temp_dir(), &document, viewport).await?;
                let (width, height) = viewport.dimensions();
                println!(
                    "Preview ({viewport}, {width}x{height}) written to {}",
                    path.display().to_string().bold()
                );
            }
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.export_path.clone());
                let document = self.orchestrator.current().await;
                write_export(&path, &document).await?;
                println!("Exported to {}", path.display().to_string().bold());
            }
            Command::History => print_history(&self.orchestrator.history().await),
            Command::New => self.new_project().await,
            Command::Help => print_help(),
            Command::Quit => {}
        }
        Ok(())
    }

    async fn generate(&self, instruction: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Generating with {}...", self.provider.display_name()));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = self.orchestrator.submit(instruction, self.provider).await;
        spinner.finish_and_clear();

        match outcome {
            SubmitOutcome::Generated { entry } => println!("{} {}", "ai>".cyan(), entry.content),
            SubmitOutcome::Failed { entry, .. } => {
                println!("{} {}", "ai>".cyan(), entry.content.red())
            }
            SubmitOutcome::Rejected(rejection) => eprintln!("{}", rejection.to_string().yellow()),
        }
    }

    /// Resets the session and re-applies the current style to the placeholder.
    async fn new_project(&self) {
        match self.orchestrator.new_project().await {
            Ok(()) => {
                println!("{}", "Started a new project.".dimmed());
                self.restyle().await;
            }
            Err(rejection) => eprintln!("{}", rejection.to_string().yellow()),
        }
    }

    async fn restyle(&self) {
        let changed = self.orchestrator.apply_style(&self.style).await;
        let summary = format!(
            "style: {} / {}",
            self.style.primary_color, self.style.font_family
        );
        if changed {
            println!("{}", summary.dimmed());
        } else {
            println!("{} {}", summary.dimmed(), "(no matching rules in the stylesheet)".dimmed());
        }
    }

    fn list_providers(&self) {
        for (id, status) in self.orchestrator.registry().status() {
            let marker = if id == self.provider { "*" } else { " " };
            let status = match status {
                ProviderStatus::Ready { .. } => status.to_string().green(),
                ProviderStatus::NotConfigured { .. } => status.to_string().yellow(),
            };
            println!(" {marker} {:<12} {status}", id.to_string());
        }
    }

    /// Warns when the selected provider cannot serve requests.
    fn report_provider(&self) {
        match self.orchestrator.registry().get(self.provider) {
            Ok(provider) => println!(
                "{}",
                format!("Using {} ({})", self.provider.display_name(), provider.model()).dimmed()
            ),
            Err(e) => eprintln!("{}", e.user_message().yellow()),
        }
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Generate(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    match name.to_ascii_lowercase().as_str() {
        "provider" => arg
            .map(|a| {
                ProviderId::from_str(a)
                    .map_err(|_| format!("unknown provider `{a}` (choose {})", names::<ProviderId>()))
            })
            .transpose()
            .map(Command::Provider),
        "color" => {
            let arg = arg.ok_or("usage: /color <#hex>")?;
            HexColor::from_str(arg).map(Command::Color)
        }
        "font" => {
            let arg = arg.ok_or_else(|| format!("usage: /font <{}>", names::<FontFamily>()))?;
            FontFamily::from_str(arg)
                .map(Command::Font)
                .map_err(|_| format!("unknown font `{arg}` (choose {})", names::<FontFamily>()))
        }
        "quick" => {
            let arg =
                arg.ok_or_else(|| format!("usage: /quick <{}>", names::<QuickComponent>()))?;
            QuickComponent::from_str(arg).map(Command::Quick).map_err(|_| {
                format!("unknown component `{arg}` (choose {})", names::<QuickComponent>())
            })
        }
        "preview" => match arg {
            None => Ok(Command::Preview(Viewport::default())),
            Some(arg) => Viewport::from_str(arg).map(Command::Preview).map_err(|_| {
                format!("unknown viewport `{arg}` (choose {})", names::<Viewport>())
            }),
        },
        "export" => Ok(Command::Export(arg.map(PathBuf::from))),
        "code" => Ok(Command::Code),
        "snippet" => Ok(Command::Snippet),
        "history" => Ok(Command::History),
        "new" => Ok(Command::New),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `/{other}`; type /help for a list")),
    }
}

fn names<T: IntoEnumIterator + std::fmt::Display>() -> String {
    T::iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

/// Writes the preview frame for `viewport` into `dir`.
async fn write_preview(
    dir: &Path,
    document: &SourceDocument,
    viewport: Viewport,
) -> Result<PathBuf, VizionError> {
    let path = dir.join(PREVIEW_FILE_NAME);
    tokio::fs::write(&path, preview_frame(document, viewport))
        .await
        .map_err(|e| VizionError::Internal(format!("failed to write {}: {e}", path.display())))?;
    Ok(path)
}

/// Writes the standalone export page to `path`.
async fn write_export(path: &Path, document: &SourceDocument) -> Result<(), VizionError> {
    tokio::fs::write(path, export_document(document))
        .await
        .map_err(|e| VizionError::Internal(format!("failed to write {}: {e}", path.display())))?;
    info!(path = %path.display(), "site exported");
    Ok(())
}

fn print_history(entries: &[ConversationEntry]) {
    if entries.is_empty() {
        println!("{}", "No messages yet.".dimmed());
        return;
    }
    for entry in entries {
        let label = match entry.role {
            Role::User => "you>".dimmed(),
            Role::Assistant => "ai>".cyan(),
        };
        let content = if entry.is_error {
            entry.content.red()
        } else {
            entry.content.normal()
        };
        println!("{} {label} {content}", entry.id.to_string().dimmed());
    }
}

fn print_help() {
    let rows = [
        ("<text>", "describe the website or a change to it"),
        ("/provider [name]", "list providers or switch to one"),
        ("/color <#hex>", "set the primary color"),
        ("/font <name>", "set the body font"),
        ("/quick <component>", "add a header, hero, features or footer section"),
        ("/code", "show the HTML, CSS and JS sources"),
        ("/snippet", "print the HTML with its CSS inlined"),
        ("/preview [viewport]", "write a preview page (desktop, tablet, mobile)"),
        ("/export [path]", "write a standalone HTML page"),
        ("/history", "show the conversation"),
        ("/new", "start a new project"),
        ("/quit", "leave the shell"),
    ];
    for (usage, description) in rows {
        println!("  {:<22} {description}", usage.yellow());
    }
}
