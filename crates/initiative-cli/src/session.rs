//! Interactive play session: one timeline driven by typed commands.

use clap::{Parser, Subcommand};
use initiative_core::{
    catalog::ActionCatalog,
    config::Config,
    dice,
    startup::apply_startup_args,
    timeline::{Timeline, UNNAMED_SUBJECT},
    token::TokenRegistry,
    types::{BlockId, Direction, Target},
};
use rand::rngs::StdRng;

/// One input line.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
pub struct PlayLine {
    #[command(subcommand)]
    pub command: PlayCommand,
}

#[derive(Subcommand, Debug)]
pub enum PlayCommand {
    /// Add a subject and select it
    Add {
        /// Keep the current selection
        #[arg(long)]
        no_select: bool,
        name: Vec<String>,
    },
    /// Select the subject at INDEX
    Select { index: usize },
    /// Select the next subject, wrapping
    Next,
    /// Select the previous subject, wrapping
    Prev,
    /// Move the selected subject left or right, wrapping
    Move { direction: Direction },
    /// Append a catalog action to the selected subject
    Drop {
        #[arg(required = true)]
        action: Vec<String>,
    },
    /// Delete the selected subject's last action
    Pop,
    /// Delete a block by id
    Delete { block: u64 },
    /// Remove the subject at INDEX
    Remove { index: usize },
    /// Add or remove status tokens
    Token {
        #[command(subcommand)]
        subcommand: TokenCommand,
    },
    /// Let time pass (default: one turn)
    Advance {
        #[arg(allow_hyphen_values = true)]
        seconds: Option<i64>,
    },
    /// Set the clock without consuming actions
    Start { seconds: u64 },
    /// Set the turn length in seconds
    Turn { seconds: u32 },
    /// Rename a subject or block
    Rename {
        #[command(subcommand)]
        subcommand: RenameCommand,
    },
    /// Set a block's length in seconds
    Resize { block: u64, seconds: f64 },
    /// Roll for a block and append the result to its label
    Resolve { block: u64, expr: Option<String> },
    /// Evaluate a dice expression
    Roll {
        #[arg(required = true, allow_hyphen_values = true)]
        expr: Vec<String>,
    },
    /// Print the timeline
    Show,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Attach a token kind to the subject at INDEX
    Add { index: usize, kind: String },
    /// Remove the token at POSITION from the subject at INDEX
    Rm { index: usize, position: usize },
}

#[derive(Subcommand, Debug)]
pub enum RenameCommand {
    Subject {
        index: usize,
        #[arg(required = true)]
        name: Vec<String>,
    },
    Block {
        id: u64,
        #[arg(required = true)]
        name: Vec<String>,
    },
}

/// Result of a command that did not fail outright.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Done(String),
    /// Nothing changed; the command did not apply in the current state.
    Ignored(String),
    Show,
    Quit,
}

pub struct Session {
    pub timeline: Timeline,
    pub catalog: ActionCatalog,
    pub tokens: TokenRegistry,
    resolve_dice: String,
    rng: StdRng,
}

impl Session {
    pub fn new<S: AsRef<str>>(config: &Config, args: &[S], rng: StdRng) -> Self {
        let mut timeline = config.build_timeline();
        let mut catalog = config.build_catalog();
        apply_startup_args(args, &mut timeline, &mut catalog);
        Self {
            timeline,
            catalog,
            tokens: config.build_registry(),
            resolve_dice: config.resolve_dice.clone(),
            rng,
        }
    }

    pub fn execute(&mut self, command: PlayCommand) -> anyhow::Result<Outcome> {
        let tl = &mut self.timeline;
        let outcome = match command {
            PlayCommand::Add { no_select, name } => {
                let name = if name.is_empty() {
                    UNNAMED_SUBJECT.to_string()
                } else {
                    name.join(" ")
                };
                let id = tl.add_subject(name.clone(), !no_select);
                Outcome::Done(format!("added {id} '{name}'"))
            }
            PlayCommand::Select { index } => {
                if tl.select(index) {
                    Outcome::Done(format!("selected {index}"))
                } else {
                    Outcome::Ignored(format!("no subject at index {index}"))
                }
            }
            PlayCommand::Next => step_selection(tl, Direction::Right),
            PlayCommand::Prev => step_selection(tl, Direction::Left),
            PlayCommand::Move { direction } => {
                if tl.order_subject(direction) {
                    let to = tl.selected_index().unwrap_or_default();
                    Outcome::Done(format!("moved to {to}"))
                } else {
                    Outcome::Ignored("move needs a selection and two subjects".to_string())
                }
            }
            PlayCommand::Drop { action } => {
                let name = action.join(" ");
                match self.catalog.lookup(&name) {
                    Ok(id) => match tl.append_action(&self.catalog, id) {
                        Some(block) => Outcome::Done(format!("block {block} '{name}'")),
                        None => Outcome::Ignored("no subject selected".to_string()),
                    },
                    Err(e) => Outcome::Ignored(e.to_string()),
                }
            }
            PlayCommand::Pop => match tl.delete_last_action() {
                Some(block) => Outcome::Done(format!("deleted block {} '{}'", block.id, block.label)),
                None => Outcome::Ignored("nothing to delete".to_string()),
            },
            PlayCommand::Delete { block } => match tl.delete_block(BlockId(block)) {
                Some(b) => Outcome::Done(format!("deleted block {} '{}'", b.id, b.label)),
                None => Outcome::Ignored(format!("no block {block}")),
            },
            PlayCommand::Remove { index } => match tl.delete_subject(index) {
                Some(s) => Outcome::Done(format!("removed '{}'", s.name)),
                None => Outcome::Ignored(format!("no subject at index {index}")),
            },
            PlayCommand::Token { subcommand } => match subcommand {
                TokenCommand::Add { index, kind } => {
                    let token = self
                        .tokens
                        .lookup(&kind)
                        .ok_or_else(|| anyhow::anyhow!("unknown token kind '{kind}'"))?;
                    if tl.add_token(index, token) {
                        Outcome::Done(format!("token '{kind}' on {index}"))
                    } else {
                        Outcome::Ignored(format!("cannot add token to {index}"))
                    }
                }
                TokenCommand::Rm { index, position } => match tl.remove_token(index, position) {
                    Some(_) => Outcome::Done(format!("removed token {position} from {index}")),
                    None => Outcome::Ignored(format!("no token {position} on {index}")),
                },
            },
            PlayCommand::Advance { seconds } => {
                let seconds = seconds.unwrap_or(tl.turn_duration() as i64);
                let finished = tl.advance(seconds);
                if seconds < 1 {
                    Outcome::Ignored(format!("cannot advance by {seconds}s"))
                } else {
                    Outcome::Done(format!(
                        "t={}s ({finished} finished)",
                        tl.start_time()
                    ))
                }
            }
            PlayCommand::Start { seconds } => {
                tl.set_start_time(seconds);
                Outcome::Done(format!("t={seconds}s"))
            }
            PlayCommand::Turn { seconds } => {
                if tl.set_turn_duration(seconds) {
                    Outcome::Done(format!("turn={seconds}s"))
                } else {
                    Outcome::Ignored("turn length must be positive".to_string())
                }
            }
            PlayCommand::Rename { subcommand } => {
                let (target, name) = match subcommand {
                    RenameCommand::Subject { index, name } => {
                        let Some(subject) = tl.subject_at(index) else {
                            return Ok(Outcome::Ignored(format!("no subject at index {index}")));
                        };
                        (Target::Subject(subject.id), name.join(" "))
                    }
                    RenameCommand::Block { id, name } => (Target::Block(BlockId(id)), name.join(" ")),
                };
                if tl.rename(target, &name) {
                    Outcome::Done(format!("renamed to '{name}'"))
                } else {
                    Outcome::Ignored("nothing renamed".to_string())
                }
            }
            PlayCommand::Resize { block, seconds } => {
                if tl.resize_seconds(BlockId(block), seconds) {
                    let width = tl.block(BlockId(block)).map_or(0, |b| b.width_units);
                    Outcome::Done(format!("block {block} is {:.1}s", tl.units_to_seconds(width)))
                } else {
                    Outcome::Ignored(format!("no block {block}"))
                }
            }
            PlayCommand::Resolve { block, expr } => {
                if tl.block(BlockId(block)).is_none() {
                    return Ok(Outcome::Ignored(format!("no block {block}")));
                }
                let expr = expr.unwrap_or_else(|| self.resolve_dice.clone());
                let roll = dice::evaluate(&expr, &mut self.rng)?;
                if tl.resolve(BlockId(block), &roll) {
                    Outcome::Done(format!("block {block}: {roll}"))
                } else {
                    Outcome::Ignored(format!("no block {block}"))
                }
            }
            PlayCommand::Roll { expr } => {
                let roll = dice::evaluate(&expr.join(""), &mut self.rng)?;
                Outcome::Done(roll.to_string())
            }
            PlayCommand::Show => Outcome::Show,
            PlayCommand::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }
}

fn step_selection(tl: &mut Timeline, direction: Direction) -> Outcome {
    match tl.select_next(direction) {
        Some(i) => Outcome::Done(format!("selected {i}")),
        None => Outcome::Ignored("no subjects".to_string()),
    }
}

/// Split an input line into words, or `None` for blank lines and comments.
pub fn tokenize(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.split_whitespace().collect())
}
