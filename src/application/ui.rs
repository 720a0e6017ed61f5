#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Select;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio::task;

use crate::domain::models::Affordance;
use crate::domain::models::DialogueService;
use crate::domain::models::CaseNotes;
use crate::domain::models::Event;
use crate::domain::models::IntakeError;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::services::SessionIdentity;
use crate::domain::services::TurnController;
use crate::infrastructure::dialogue::HttpDialogue;
use crate::infrastructure::storage::FileStore;

const LINE_WIDTH: usize = 80;
const TYPE_INSTEAD: &str = "Type a reply instead...";
const DONE: &str = "Done";

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /notes (/n) - Shows the case notes collected so far.
- /session (/s) - Prints the session id shared with the dialogue engine.
- /quit /exit (/q) - Exit the intake.
- /help (/h) - Provides this help menu.

ANSWERING:
- Questions with choices show a list. Pick one with the arrow keys and Enter, it is sent right away.
- Questions accepting several answers show checkboxes. Press Enter to tick or untick one, then choose "Done" to send them in the order you ticked them.
- Press Esc, or choose "Type a reply instead...", to answer in your own words.
- When a summary is shown, reply to confirm it or say what needs correcting.
        "#;

    return text.trim().to_string();
}

/// What the user asked for at the prompt.
#[derive(Debug, PartialEq)]
enum Intent {
    Send(String),
    Toggle {
        option: String,
        included: bool,
        cursor: usize,
    },
    Done,
    TypeInstead,
    Help,
    Notes,
    Session,
    Quit,
    Nothing,
}

/// Snapshot of the live prompt handed to the blocking input thread.
struct Prompt {
    options: Vec<String>,
    multi_select: bool,
    selected: Vec<String>,
    cursor: usize,
    affordance: Affordance,
}

impl Prompt {
    fn from_controller(controller: &TurnController, cursor: usize) -> Prompt {
        let latest = controller.log().latest_bot_message();
        return Prompt {
            options: latest
                .map(|message| return message.options.to_vec())
                .unwrap_or_default(),
            multi_select: controller.is_multi_select_pending(),
            selected: controller.selections().to_vec(),
            cursor,
            affordance: controller.affordance(),
        };
    }
}

/// Rows of the checkbox picker: each offered option with its tick mark,
/// followed by the finishing entries.
fn checkbox_items(options: &[String], selected: &[String]) -> Vec<String> {
    let mut items = options
        .iter()
        .map(|option| {
            let mark = if selected.contains(option) { "[x]" } else { "[ ]" };
            return format!("{mark} {option}");
        })
        .collect::<Vec<String>>();
    items.push(DONE.to_string());
    items.push(TYPE_INSTEAD.to_string());

    return items;
}

fn checkbox_intent(options: &[String], selected: &[String], idx: usize) -> Intent {
    if let Some(option) = options.get(idx) {
        return Intent::Toggle {
            option: option.to_string(),
            included: !selected.contains(option),
            cursor: idx,
        };
    }

    if idx == options.len() {
        return Intent::Done;
    }

    return Intent::TypeInstead;
}

fn format_message(message: &Message, interactive: bool) -> String {
    let mut lines: Vec<String> = vec![];

    let author = message.role.to_string();
    let header = match message.role {
        Role::User => author.green().bold().to_string(),
        Role::Bot => author.cyan().bold().to_string(),
    };
    lines.push(header);

    for line in message.as_string_lines(LINE_WIDTH) {
        if message.message_type() == MessageType::Error {
            lines.push(format!("  {}", line.red()));
        } else {
            lines.push(format!("  {line}"));
        }
    }

    for (idx, option) in message.options.iter().enumerate() {
        let marker = if message.multi_select {
            "[ ]".to_string()
        } else {
            format!("({})", idx + 1)
        };
        let entry = format!("    {marker} {option}");
        if interactive {
            lines.push(entry.yellow().to_string());
        } else {
            lines.push(entry.dimmed().to_string());
        }
    }

    return lines.join("\n");
}

fn format_case_notes(notes: Option<CaseNotes>) -> String {
    let Some(notes) = notes else {
        return "No case notes yet. They fill in as the conversation goes.".to_string();
    };

    let mut lines = vec!["Medical Notes".bold().to_string()];
    for (label, value) in notes.rows() {
        lines.push(format!("  {:<20}{value}", format!("{label}:")));
    }

    return lines.join("\n");
}

fn render_appended(controller: &TurnController, rx: &mut mpsc::UnboundedReceiver<Event>) {
    while let Ok(Event::MessageAppended(index)) = rx.try_recv() {
        if let Some(message) = controller.log().get(index) {
            let interactive = controller.log().is_interactive(index);
            println!("\n{}", format_message(message, interactive));
        }
    }
}

fn parse_text(text: String) -> Intent {
    if let Some(command) = SlashCommand::parse(&text) {
        if command.is_quit() {
            return Intent::Quit;
        }
        if command.is_help() {
            return Intent::Help;
        }
        if command.is_notes() {
            return Intent::Notes;
        }
        if command.is_session() {
            return Intent::Session;
        }
    }

    if text.trim().is_empty() {
        return Intent::Nothing;
    }

    return Intent::Send(text);
}

fn read_text(affordance: &Affordance) -> Result<Intent> {
    let text = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "{} ({})",
            affordance.placeholder, affordance.action_label
        ))
        .allow_empty(true)
        .interact_text()?;

    return Ok(parse_text(text));
}

fn read_intent(prompt: Prompt) -> Result<Intent> {
    let theme = ColorfulTheme::default();

    if prompt.multi_select {
        let picked = Select::with_theme(&theme)
            .with_prompt("Select all that apply (Enter to tick, then Done)")
            .default(prompt.cursor)
            .items(&checkbox_items(&prompt.options, &prompt.selected))
            .interact_opt()?;

        let intent = match picked {
            Some(idx) => checkbox_intent(&prompt.options, &prompt.selected, idx),
            None => Intent::TypeInstead,
        };
        if intent == Intent::TypeInstead {
            return read_text(&prompt.affordance);
        }

        return Ok(intent);
    }

    if !prompt.options.is_empty() {
        let mut items = prompt.options.to_vec();
        items.push(TYPE_INSTEAD.to_string());

        let picked = Select::with_theme(&theme)
            .with_prompt("Choose an answer")
            .default(0)
            .items(&items)
            .interact_opt()?;

        if let Some(idx) = picked {
            if idx < prompt.options.len() {
                return Ok(Intent::Send(prompt.options[idx].to_string()));
            }
        }
    }

    return read_text(&prompt.affordance);
}

async fn submit(
    controller: &mut TurnController,
    rx: &mut mpsc::UnboundedReceiver<Event>,
    text: Option<&str>,
) {
    let request = match controller.begin(text) {
        Ok(request) => request,
        Err(IntakeError::EmptySelection) => {
            println!("{}", "Select at least one option before sending.".yellow());
            return;
        }
        Err(err) => {
            tracing::debug!(error = ?err, "submission ignored");
            return;
        }
    };

    render_appended(controller, rx);
    println!("{}", controller.affordance().placeholder.dimmed());

    controller.dispatch(request).await;
}

pub async fn start() -> Result<()> {
    let identity = SessionIdentity::new(Box::<FileStore>::default());
    let session_id = identity.get_or_create_session_id().await;

    let service = HttpDialogue::default();
    if let Err(err) = service.health_check().await {
        println!(
            "{}",
            format!("Hey, it looks like the dialogue engine isn't reachable right now. Your messages will fail until it is back.\n\nError: {err}").yellow()
        );
    }

    let mut controller = TurnController::new(&session_id, Box::new(service));
    let mut rx = controller.subscribe();

    println!("{}", "● AI Intake Assistant".bold());
    println!("{}", "Say hi to begin. Type /help for commands.".dimmed());

    let mut cursor = 0;
    loop {
        render_appended(&controller, &mut rx);

        let prompt = Prompt::from_controller(&controller, cursor);
        let intent = task::spawn_blocking(move || return read_intent(prompt)).await??;

        match intent {
            Intent::Quit => break,
            Intent::Help => println!("\n{}", help_text()),
            Intent::Notes => println!("\n{}", format_case_notes(controller.case_notes())),
            Intent::Session => println!("\n{}", controller.session_id()),
            Intent::Nothing | Intent::TypeInstead => continue,
            Intent::Toggle {
                option,
                included,
                cursor: picked,
            } => {
                controller.toggle(&option, included);
                cursor = picked;
            }
            Intent::Send(text) => {
                submit(&mut controller, &mut rx, Some(&text)).await;
                cursor = 0;
            }
            Intent::Done => {
                submit(&mut controller, &mut rx, None).await;
                cursor = 0;
            }
        }
    }

    return Ok(());
}
