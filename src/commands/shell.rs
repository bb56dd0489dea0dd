//! Interactive shell.
//!
//! One loop owns the controller and waits on whichever comes first: a line
//! from stdin or an event from the push channel. Confirmation prompts read
//! from the same stdin lines, so a push event never steals an answer.

use std::io::Write;

use api::Api;
use config::ClientConfig;
use models::ClientError;
use push::PushListener;
use tokio::io::{AsyncBufRead, Lines};

use crate::app::Controller;
use crate::utils::render;

use super::{alert, browse, preview, stdin_lines, submit, tasks, watch, Prompt};

const HELP: &str = "\
ls [path]                 list the current directory, or browse to path
cd <dir>                  enter a directory (name or path)
up                        go to the parent directory
add <file>                queue one file with the current form
batch                     queue every video in the current directory
tasks                     refresh and show the task list
rm <id>                   delete a task
clear                     delete every finished task
type <kind>               transcode, remux, trim or thumbnail
set <field> <value>       set a form field
form                      show the form
recursive on|off          batch into subdirectories
delete-original on|off    remove inputs after processing
preview <path|#id>        open a file or a finished task's output
close                     close the preview
status                    connection, directory, progress
help                      this text
quit                      leave";

#[derive(Debug, PartialEq)]
pub enum Command {
    Ls(Option<String>),
    Cd(String),
    Up,
    Add(String),
    Batch,
    Tasks,
    Rm(i64),
    Clear,
    Type(String),
    Set(String, String),
    Form,
    Recursive(bool),
    DeleteOriginal(bool),
    Preview(String),
    Close,
    Status,
    Help,
    Quit,
}

impl Command {
    /// `None` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = |usage: &str| {
            if rest.is_empty() {
                Err(format!("usage: {name} {usage}"))
            } else {
                Ok(rest.to_owned())
            }
        };

        let command = match name {
            "ls" => Command::Ls(Some(rest.to_owned()).filter(|r| !r.is_empty())),
            "cd" => Command::Cd(arg("<dir>")?),
            "up" | ".." => Command::Up,
            "add" => Command::Add(arg("<file>")?),
            "batch" => Command::Batch,
            "tasks" => Command::Tasks,
            "rm" => Command::Rm(
                arg("<id>")?
                    .trim_start_matches('#')
                    .parse()
                    .map_err(|_| format!("not a task id: {rest}"))?,
            ),
            "clear" => Command::Clear,
            "type" => Command::Type(arg("<kind>")?),
            "set" => {
                let value = arg("<field> <value>")?;
                match value.split_once(char::is_whitespace) {
                    Some((field, value)) => Command::Set(field.to_owned(), value.trim().to_owned()),
                    None => Command::Set(value, String::new()),
                }
            }
            "form" => Command::Form,
            "recursive" => Command::Recursive(switch(&arg("on|off")?)?),
            "delete-original" => Command::DeleteOriginal(switch(&arg("on|off")?)?),
            "preview" => Command::Preview(arg("<path|#id>")?),
            "close" => Command::Close,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(Some(command))
    }
}

fn switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("expected on or off, got `{other}`")),
    }
}

pub async fn run<A: Api>(c: &mut Controller<A>, config: &ClientConfig) {
    let (listener, mut events) =
        PushListener::new(config.push_url(), config.reconnect_delay).spawn();
    let mut input = stdin_lines();

    c.refresh_quietly().await;
    match c.browse("").await {
        Ok(()) => browse::show(c),
        Err(err) => alert(&err),
    }
    tasks::show(c);
    prompt(c);

    loop {
        tokio::select! {
            line = input.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        tracing::error!(%err, "reading stdin failed");
                        break;
                    }
                };
                match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(err) = execute(c, command, &mut input).await {
                            alert(&err);
                        }
                    }
                    Ok(None) => {}
                    Err(usage) => eprintln!("{usage}"),
                }
                prompt(c);
            }
            Some(event) = events.recv() => {
                watch::show_event(c, event, config).await;
            }
        }
    }

    c.close_preview().await;
    listener.abort();
}

async fn execute<A: Api, R: AsyncBufRead + Unpin + Send>(
    c: &mut Controller<A>,
    command: Command,
    input: &mut Lines<R>,
) -> Result<(), ClientError> {
    match command {
        Command::Ls(None) => {
            let current = c.state.current_path.clone();
            browse::run(c, &current).await?;
        }
        Command::Ls(Some(path)) => browse::run(c, &path).await?,
        Command::Cd(dir) => {
            let path = browse::resolve(c, &dir).to_owned();
            browse::run(c, &path).await?;
        }
        Command::Up => browse::up(c, None).await?,
        Command::Add(file) => {
            let path = browse::resolve(c, &file).to_owned();
            submit::add(c, &path).await?;
        }
        Command::Batch => submit::batch(c, None).await?,
        Command::Tasks => tasks::list(c).await?,
        Command::Rm(id) => tasks::remove(c, id, &mut Prompt { lines: input }).await?,
        Command::Clear => tasks::clear(c, &mut Prompt { lines: input }).await,
        Command::Type(kind) => {
            c.state.form.select(&kind)?;
            print!("{}", render::form(&c.state.form));
        }
        Command::Set(field, value) => c.state.form.set(&field, &value)?,
        Command::Form => print!("{}", render::form(&c.state.form)),
        Command::Recursive(on) => c.state.form.recursive = on,
        Command::DeleteOriginal(on) => c.state.form.delete_original = on,
        Command::Preview(target) => {
            let path = browse::resolve(c, &target).to_owned();
            preview::open(c, &path, None).await?;
        }
        Command::Close => c.close_preview().await,
        Command::Status => print!("{}", render::status(&c.state)),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn prompt<A: Api>(c: &Controller<A>) {
    print!("{}> ", c.state.current_path);
    let _ = std::io::stdout().flush();
}
