mod app;
mod commands;
mod flows;
mod state;
mod utils;

use api::HttpApi;
use clap::{Args, Parser, Subcommand};
use config::ClientConfig;
use models::ClientError;
use tracing_subscriber::EnvFilter;

use crate::app::{Always, Controller};
use crate::commands::{alert, stdin_lines, Prompt};
use crate::flows::TaskForm;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Client for a remote video processing server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server base URL, overrides FORGE_URL
    #[arg(long, global = true)]
    server: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory on the server (its default directory without PATH)
    Browse { path: Option<String> },

    /// List the parent of PATH
    Up { path: Option<String> },

    /// Queue one file
    Add {
        file: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Queue every video of a directory
    Batch {
        /// Defaults to the server's default directory
        directory: Option<String>,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Show the task list
    Tasks,

    /// Delete a task
    Rm {
        id: i64,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every finished task
    Clear {
        #[arg(short, long)]
        yes: bool,
    },

    /// Follow live progress until interrupted
    Watch,

    /// Open a server file, or `#ID` for a finished task's output
    Preview {
        target: String,

        #[arg(long)]
        title: Option<String>,
    },

    /// Interactive shell (default)
    Shell,
}

#[derive(Args, Default)]
struct FormArgs {
    /// transcode, remux, trim or thumbnail
    #[arg(short = 't', long = "type")]
    kind: Option<String>,

    #[arg(long)]
    video_codec: Option<String>,

    #[arg(long)]
    audio_codec: Option<String>,

    #[arg(long)]
    bitrate: Option<String>,

    /// WIDTHxHEIGHT, empty keeps the source size
    #[arg(long)]
    resolution: Option<String>,

    /// Remux container
    #[arg(long)]
    ext: Option<String>,

    /// Trim start, HH:MM:SS
    #[arg(long)]
    start: Option<String>,

    /// Trim duration, HH:MM:SS
    #[arg(long)]
    duration: Option<String>,

    /// Seconds between thumbnails
    #[arg(long)]
    interval: Option<String>,

    /// Thumbnail WIDTHxHEIGHT
    #[arg(long)]
    scale: Option<String>,

    /// Batch into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Remove the input once processed
    #[arg(long)]
    delete_original: bool,
}

impl FormArgs {
    fn apply(self, form: &mut TaskForm) -> Result<(), ClientError> {
        if let Some(kind) = &self.kind {
            form.select(kind)?;
        }
        let fields = [
            ("videoCodec", self.video_codec),
            ("audioCodec", self.audio_codec),
            ("bitrate", self.bitrate),
            ("resolution", self.resolution),
            ("outputExtension", self.ext),
            ("startTime", self.start),
            ("duration", self.duration),
            ("interval", self.interval),
            ("scale", self.scale),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set(field, &value)?;
            }
        }
        form.recursive = self.recursive;
        form.delete_original = self.delete_original;
        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,forge={level},api={level},push={level},config={level},models={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match ClientConfig::from_env().and_then(|config| match &cli.server {
        Some(server) => config.with_server_url(server),
        None => Ok(config),
    }) {
        Ok(config) => config,
        Err(err) => {
            alert(&err);
            std::process::exit(2);
        }
    };
    tracing::debug!(server = %config.server_url, output_dir = %config.output_dir, "configured");

    let api = HttpApi::new(&config.server_url);
    let mut controller = Controller::new(api, config.clone());

    if let Err(err) = run(&mut controller, &config, cli.command.unwrap_or(Commands::Shell)).await {
        alert(&err);
        std::process::exit(1);
    }
}

async fn run(
    c: &mut Controller<HttpApi>,
    config: &ClientConfig,
    command: Commands,
) -> Result<(), ClientError> {
    match command {
        Commands::Browse { path } => commands::browse::run(c, path.as_deref().unwrap_or("")).await,
        Commands::Up { path } => commands::browse::up(c, path.as_deref()).await,
        Commands::Add { file, form } => {
            form.apply(&mut c.state.form)?;
            commands::submit::add(c, &file).await
        }
        Commands::Batch { directory, form } => {
            form.apply(&mut c.state.form)?;
            if directory.is_none() {
                c.browse("").await?;
            }
            commands::submit::batch(c, directory.as_deref()).await
        }
        Commands::Tasks => commands::tasks::list(c).await,
        Commands::Rm { id, yes } => {
            if yes {
                commands::tasks::remove(c, id, &mut Always(true)).await
            } else {
                let mut lines = stdin_lines();
                commands::tasks::remove(c, id, &mut Prompt { lines: &mut lines }).await
            }
        }
        Commands::Clear { yes } => {
            c.refresh_tasks().await?;
            if yes {
                commands::tasks::clear(c, &mut Always(true)).await;
            } else {
                let mut lines = stdin_lines();
                commands::tasks::clear(c, &mut Prompt { lines: &mut lines }).await;
            }
            Ok(())
        }
        Commands::Watch => {
            commands::watch::run(c, config).await;
            Ok(())
        }
        Commands::Preview { target, title } => {
            commands::preview::run(c, &target, title.as_deref()).await
        }
        Commands::Shell => {
            commands::shell::run(c, config).await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::TaskType;

    #[test]
    fn cli_defaults_to_shell() {
        let cli = Cli::try_parse_from(["forge"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn form_flags_fill_the_form() {
        let cli = Cli::try_parse_from([
            "forge", "add", "/v/a.mkv", "--type", "trim", "--start", "00:00:10", "--duration",
            "30", "--server", "http://nas:8080",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://nas:8080"));
        let Some(Commands::Add { file, form }) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(file, "/v/a.mkv");

        let mut task_form = TaskForm::default();
        form.apply(&mut task_form).unwrap();
        assert_eq!(task_form.kind, TaskType::Trim);
        assert_eq!(task_form.start_time, "00:00:10");
        assert_eq!(task_form.duration, "30");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut form = TaskForm::default();
        let args = FormArgs {
            kind: Some("upscale".to_owned()),
            ..FormArgs::default()
        };
        assert_eq!(
            args.apply(&mut form).unwrap_err().to_string(),
            "Unknown task type: upscale"
        );
    }
}
