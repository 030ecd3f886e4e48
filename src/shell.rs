// Interactive shell: one session of the three-phase workflow.
//
// Commands are parsed by a pure function so the grammar can be tested
// without a terminal. Multi-word arguments are separated with '|', e.g.
//   events Austin, TX | music, food | 2026-11-01 | 2026-11-30

use std::io::Write as _;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use crate::config::Config;
use crate::output::{markdown, terminal};
use crate::workflow::actions::ActionChoice;
use crate::workflow::discovery::{self, AttendeeQuery, EventQuery, DATE_FORMAT};
use crate::workflow::phase::Phase;
use crate::workflow::{DispatchOutcome, Workflow, WorkflowError};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Phase(Phase),
    Events {
        location: String,
        categories: Vec<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Attendees {
        event_name: String,
        date: Option<String>,
    },
    /// Discover attendees for the n-th (1-based) event option.
    Use(usize),
    Toggle(String),
    SelectAll(bool),
    Promote,
    Remove(String),
    Act,
    Show,
    Status,
    Export,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "phase" | "go" => ShellCommand::Phase(rest.parse()?),
        "events" => parse_events(rest)?,
        "attendees" => {
            let mut parts = split_fields(rest);
            let event_name = parts.next().unwrap_or_default();
            if event_name.is_empty() {
                return Err("usage: attendees <event name> [| date]".to_string());
            }
            ShellCommand::Attendees {
                event_name,
                date: parts.next().filter(|d| !d.is_empty()),
            }
        }
        "use" => {
            let n: usize = rest
                .parse()
                .map_err(|_| "usage: use <event number>".to_string())?;
            if n == 0 {
                return Err("event numbers start at 1".to_string());
            }
            ShellCommand::Use(n)
        }
        "toggle" | "t" => {
            if rest.is_empty() {
                return Err("usage: toggle <username>".to_string());
            }
            ShellCommand::Toggle(rest.to_string())
        }
        "all" => ShellCommand::SelectAll(true),
        "none" => ShellCommand::SelectAll(false),
        "promote" => ShellCommand::Promote,
        "remove" | "rm" => {
            if rest.is_empty() {
                return Err("usage: remove <username>".to_string());
            }
            ShellCommand::Remove(rest.to_string())
        }
        "act" => ShellCommand::Act,
        "show" | "ls" => ShellCommand::Show,
        "status" => ShellCommand::Status,
        "export" => ShellCommand::Export,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (type `help`)")),
    };

    Ok(Some(command))
}

fn parse_events(rest: &str) -> Result<ShellCommand, String> {
    let usage = "usage: events <location> | <category, ...> [| start | end]";
    let mut parts = split_fields(rest);

    let location = parts.next().unwrap_or_default();
    let categories: Vec<String> = parts
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if location.is_empty() {
        return Err(usage.to_string());
    }

    let start = parts.next().map(|s| parse_date(&s)).transpose()?;
    let end = parts.next().map(|s| parse_date(&s)).transpose()?;

    // Missing categories are rejected by the workflow, not here.
    Ok(ShellCommand::Events {
        location,
        categories,
        start,
        end,
    })
}

fn split_fields(rest: &str) -> impl Iterator<Item = String> + '_ {
    rest.split('|').map(|s| s.trim().to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

/// Run the interactive session on stdin until `quit` or end of input.
pub async fn run(workflow: &mut Workflow, config: &Config) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    terminal::display_phase_bar(workflow.state().phase());

    loop {
        prompt(workflow.state().phase())?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                terminal::alert(&message);
                continue;
            }
        };
        debug!(?command, "Shell command");

        if command == ShellCommand::Quit {
            break;
        }

        if let Err(e) = execute(workflow, config, command, &mut lines).await {
            report_error(&e);
        }
    }

    println!("Bye.");
    Ok(())
}

async fn execute<R>(
    workflow: &mut Workflow,
    config: &Config,
    command: ShellCommand,
    lines: &mut Lines<R>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    match command {
        ShellCommand::Phase(phase) => {
            let change = workflow.switch_phase(phase);
            terminal::display_phase_bar(change.current);
            if change.rerender_queue {
                terminal::display_queue(workflow.state().queue().as_slice());
            } else {
                render_current(workflow);
            }
        }

        ShellCommand::Events {
            location,
            categories,
            start,
            end,
        } => {
            let (default_start, default_end) =
                discovery::default_date_range(chrono::Local::now().date_naive());
            let query = EventQuery {
                location,
                start_date: start.unwrap_or(default_start),
                end_date: end.unwrap_or(default_end),
                categories,
                max_results: config.max_events,
            };
            for unknown in query.unknown_categories() {
                terminal::warning(&format!("'{unknown}' is not a known category"));
            }
            workflow.switch_phase(Phase::Events);
            let events = workflow.discover_events(&query).await?;
            terminal::display_events(events);
            if !events.is_empty() {
                println!("{}", "Run `use <n>` to find attendees of an event.".dimmed());
            }
        }

        ShellCommand::Attendees { event_name, date } => {
            let query = AttendeeQuery {
                event_name,
                event_date: date,
                max_results: config.max_attendees,
            };
            discover_attendees(workflow, &query).await?;
        }

        ShellCommand::Use(n) => {
            let event = workflow
                .state()
                .events()
                .get(n - 1)
                .cloned()
                .ok_or_else(|| {
                    WorkflowError::Validation(format!(
                        "No event #{n}; {} event(s) available",
                        workflow.state().event_options().len()
                    ))
                })?;
            let query = AttendeeQuery {
                event_name: event.event_name,
                event_date: Some(event.exact_date),
                max_results: config.max_attendees,
            };
            discover_attendees(workflow, &query).await?;
        }

        ShellCommand::Toggle(username) => {
            workflow.toggle(&username)?;
            render_attendees(workflow);
        }

        ShellCommand::SelectAll(select) => {
            workflow.select_all(select);
            render_attendees(workflow);
        }

        ShellCommand::Promote => {
            let promotion = workflow.promote_selection()?;
            println!("Added {} attendee(s) to the queue.", promotion.added);
            if promotion.skipped > 0 {
                println!("  {} already queued, skipped.", promotion.skipped);
            }
            terminal::display_phase_bar(workflow.state().phase());
            terminal::display_queue(workflow.state().queue().as_slice());
        }

        ShellCommand::Remove(username) => {
            if workflow.remove_from_queue(&username) {
                println!("Removed {username} from the queue.");
            } else {
                println!("{username} is not in the queue.");
            }
            terminal::display_queue(workflow.state().queue().as_slice());
        }

        ShellCommand::Act => {
            let queued = workflow.state().queue().len();
            if queued == 0 {
                return Err(WorkflowError::EmptyQueue.into());
            }

            terminal::display_action_menu(queued);
            prompt_text("action")?;
            let answer = lines.next_line().await?.unwrap_or_default();
            let choice = ActionChoice::from_input(&answer);

            let message = match choice {
                ActionChoice::Chosen(action) if action.takes_message() => {
                    prompt_text("message (optional)")?;
                    lines.next_line().await?
                }
                _ => None,
            };

            match workflow.dispatch(choice, message.as_deref()).await? {
                DispatchOutcome::Cancelled => println!("Cancelled."),
                DispatchOutcome::Completed(report) => terminal::display_action_report(&report),
            }
        }

        ShellCommand::Show => render_current(workflow),

        ShellCommand::Status => crate::status::show(workflow.state(), config),

        ShellCommand::Export => {
            let state = workflow.state();
            markdown::write_report(
                &config.report_path,
                state.queue().as_slice(),
                state.last_report(),
            )?;
            println!("Report written to {}", config.report_path.display());
        }

        ShellCommand::Help => print_help(),

        ShellCommand::Quit => {}
    }

    Ok(())
}

async fn discover_attendees(workflow: &mut Workflow, query: &AttendeeQuery) -> Result<()> {
    workflow.switch_phase(Phase::Attendees);
    workflow.discover_attendees(query).await?;
    render_attendees(workflow);
    Ok(())
}

fn render_current(workflow: &Workflow) {
    let state = workflow.state();
    match state.phase() {
        Phase::Events => terminal::display_events(state.events()),
        Phase::Attendees => render_attendees(workflow),
        Phase::Notifications => terminal::display_queue(state.queue().as_slice()),
    }
}

fn render_attendees(workflow: &Workflow) {
    let state = workflow.state();
    terminal::display_attendees(
        state.attendee_event(),
        state.attendees(),
        state.selection(),
        state.select_all_state(),
    );
}

/// Empty selection/queue are warnings; everything else is an error alert.
fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<WorkflowError>() {
        Some(WorkflowError::EmptySelection) | Some(WorkflowError::EmptyQueue) => {
            terminal::warning(&error.to_string())
        }
        Some(WorkflowError::Api(api)) => match api.status() {
            Some(status) => terminal::alert(&format!("Request failed (HTTP {status})")),
            None => terminal::alert(&api.to_string()),
        },
        _ => terminal::alert(&format!("{error:#}")),
    }
}

fn prompt(phase: Phase) -> Result<()> {
    print!("{}> ", phase.as_str().cyan());
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn prompt_text(label: &str) -> Result<()> {
    print!("{label}> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  events <location> | <cat, ...> [| start | end]   discover events (dates YYYY-MM-DD)");
    println!("  use <n>                                          find attendees of event #n");
    println!("  attendees <event name> [| date]                  find attendees by name");
    println!("  toggle <username> | all | none                   change the selection");
    println!("  promote                                          queue the selected attendees");
    println!("  remove <username>                                drop an attendee from the queue");
    println!("  act                                              retweet/like/comment/quote the queue");
    println!("  phase <events|attendees|notifications>           switch view");
    println!("  show | status | export | help | quit");
}
