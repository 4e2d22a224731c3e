//! Command registry and typed dispatch
//!
//! Two independently named handler sets: ordinary typed commands, resolved
//! first, and math commands bound to a live numeric variable. Lookup,
//! argument resolution and completion all live here; the editor only hands
//! over finished lines.

use crate::argument::{ArgType, Argument};
use crate::cell::NumericCell;
use crate::error::ConsoleError;
use crate::operator::{Operator, VERBS};
use crate::stream::Stream;
use crate::token::TokenCursor;

/// Handler for a typed command: resolved arguments plus the session stream,
/// returning the response text (empty string for no response).
pub type CommandHandler = Box<dyn FnMut(&[Argument], &mut dyn Stream) -> String>;

/// Handler for a math command: the session stream, the post-operation value
/// and the operator that was applied.
pub type MathHandler = Box<dyn FnMut(&mut dyn Stream, f64, Operator) -> String>;

struct Command {
    name: String,
    signature: Vec<ArgType>,
    handler: CommandHandler,
    description: String,
}

struct MathCommand {
    name: String,
    cell: Box<dyn NumericCell>,
    handler: MathHandler,
    description: String,
}

/// One tab-completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Replacement text for the edit buffer.
    pub text: String,
    /// Human-readable description of the underlying command.
    pub description: String,
}

/// Registry of commands for one console session.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    math_commands: Vec<MathCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed command.
    ///
    /// `signature` is an ordered string of type codes over `duiso`; any other
    /// character rejects the registration (returns `false`). The name is
    /// stored lowercased.
    pub fn register_command<F>(
        &mut self,
        name: &str,
        signature: &str,
        handler: F,
        description: &str,
    ) -> bool
    where
        F: FnMut(&[Argument], &mut dyn Stream) -> String + 'static,
    {
        match parse_signature(signature) {
            Ok(sig) => {
                let name = name.to_lowercase();
                log::debug!("registered command '{}' ({})", name, signature);
                self.commands.push(Command {
                    name,
                    signature: sig,
                    handler: Box::new(handler),
                    description: description.to_string(),
                });
                true
            }
            Err(err) => {
                log::warn!("rejected registration of '{}': {}", name, err);
                false
            }
        }
    }

    /// Register a math command bound to a live numeric cell.
    ///
    /// The registry never owns the referenced variable; the cell must outlive
    /// the binding.
    pub fn register_math_command<F>(
        &mut self,
        name: &str,
        cell: impl NumericCell + 'static,
        handler: F,
        description: &str,
    ) -> bool
    where
        F: FnMut(&mut dyn Stream, f64, Operator) -> String + 'static,
    {
        let name = name.to_lowercase();
        log::debug!("registered math command '{}'", name);
        self.math_commands.push(MathCommand {
            name,
            cell: Box::new(cell),
            handler: Box::new(handler),
            description: description.to_string(),
        });
        true
    }

    /// Remove the first command with this name (case-insensitive).
    pub fn remove_command(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self.commands.iter().position(|c| c.name == name) {
            Some(idx) => {
                self.commands.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the first math command with this name (case-insensitive).
    pub fn remove_math_command(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self.math_commands.iter().position(|c| c.name == name) {
            Some(idx) => {
                self.math_commands.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Completion candidates for a partial line, in registration order
    /// (commands first, then math commands).
    ///
    /// When no name matches and the partial already names a math command
    /// followed by a space, the arithmetic verbs extending the trailing text
    /// are offered instead (`"gain a"` completes to `"gain add"`).
    pub fn tab_complete(&self, partial: &str) -> Vec<Completion> {
        let partial = partial.to_lowercase();
        let mut out = Vec::new();

        for cmd in &self.commands {
            if cmd.name.starts_with(&partial) {
                out.push(Completion {
                    text: cmd.name.clone(),
                    description: cmd.description.clone(),
                });
            }
        }
        for cmd in &self.math_commands {
            if cmd.name.starts_with(&partial) {
                out.push(Completion {
                    text: cmd.name.clone(),
                    description: cmd.description.clone(),
                });
            }
        }

        if out.is_empty() {
            if let Some((name, trailing)) = partial.split_once(' ') {
                if let Some(cmd) = self.math_commands.iter().find(|c| c.name == name) {
                    for (verb, _) in VERBS {
                        if verb.starts_with(trailing) {
                            out.push(Completion {
                                text: format!("{} {}", name, verb),
                                description: cmd.description.clone(),
                            });
                        }
                    }
                }
            }
        }

        out
    }

    /// Resolve and run one submitted line.
    ///
    /// Returns the response text and a success flag. Never aborts the
    /// session: every failure maps to its error message.
    pub fn process_command(&mut self, line: &str, out: &mut dyn Stream) -> (String, bool) {
        match self.dispatch(line, out) {
            Ok(response) => (response, true),
            Err(err) => {
                log::debug!("command {:?} failed: {}", line.trim(), err);
                (err.to_string(), false)
            }
        }
    }

    fn dispatch(&mut self, line: &str, out: &mut dyn Stream) -> Result<String, ConsoleError> {
        let line = line.trim();
        let (name, tail) = match line.split_once(char::is_whitespace) {
            Some((name, tail)) => (name, tail),
            None => (line, ""),
        };
        let name = name.to_lowercase();

        // Commands win ties with math commands.
        if let Some(cmd) = self.commands.iter_mut().find(|c| c.name == name) {
            let args = resolve_arguments(&cmd.signature, tail)?;
            return Ok((cmd.handler)(&args, out));
        }

        if let Some(cmd) = self.math_commands.iter_mut().find(|c| c.name == name) {
            return run_math(cmd, tail, out);
        }

        Err(ConsoleError::UnknownCommand)
    }
}

fn parse_signature(signature: &str) -> Result<Vec<ArgType>, ConsoleError> {
    signature
        .chars()
        .map(|c| ArgType::from_code(c).ok_or(ConsoleError::RegistrationRejected(c)))
        .collect()
}

/// Walk a type signature across the argument tail.
///
/// The optional marker flips the remaining positions into best-effort mode:
/// the first parse failure there fills this and every later position with
/// `Absent` instead of failing the command. Leftover non-whitespace after the
/// signature is always an error.
fn resolve_arguments(signature: &[ArgType], tail: &str) -> Result<Vec<Argument>, ConsoleError> {
    let mut cursor = TokenCursor::new(tail);
    let mut args = Vec::new();
    let mut best_effort = false;
    let mut exhausted = false;

    for &ty in signature {
        if ty == ArgType::Optional {
            best_effort = true;
            continue;
        }
        if exhausted {
            args.push(Argument::Absent);
            continue;
        }

        let parsed = match ty {
            ArgType::Double => cursor.double().map(Argument::Double),
            ArgType::Unsigned => cursor.unsigned().map(Argument::Unsigned),
            ArgType::Signed => cursor.signed().map(Argument::Signed),
            ArgType::Text => cursor.text().map(Argument::Text),
            ArgType::Optional => unreachable!(),
        };
        match parsed {
            Ok(arg) => args.push(arg),
            Err(_) if best_effort => {
                exhausted = true;
                args.push(Argument::Absent);
            }
            Err(err) => return Err(err),
        }
    }

    if !cursor.is_exhausted() {
        return Err(ConsoleError::TooManyArguments);
    }
    Ok(args)
}

/// Math command semantics: bare name is a pure read; otherwise one verb and
/// one double operand, applied get-modify-set. Float edge cases (divide by
/// zero and friends) keep IEEE semantics rather than erroring.
fn run_math(
    cmd: &mut MathCommand,
    tail: &str,
    out: &mut dyn Stream,
) -> Result<String, ConsoleError> {
    let tail = tail.trim();
    if tail.is_empty() {
        let current = cmd.cell.get();
        return Ok((cmd.handler)(out, current, Operator::Empty));
    }

    let (verb, rest) = match tail.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (tail, ""),
    };
    let op = Operator::from_verb(&verb.to_lowercase()).ok_or(ConsoleError::UnknownOperator)?;

    let mut cursor = TokenCursor::new(rest);
    let operand = cursor.double()?;
    if !cursor.is_exhausted() {
        return Err(ConsoleError::TooManyArguments);
    }

    let value = op.apply(cmd.cell.get(), operand);
    cmd.cell.set(value);
    Ok((cmd.handler)(out, value, op))
}
