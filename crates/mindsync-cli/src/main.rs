use mindsync_core::frontmatter::document_settings;
use mindsync_core::{
    ContainerStyle, GlobalSettings, MindmapNode, RecordingVisualization, RenderDecision,
    RenderSession, Settings, SettingsSource, VisualizationEvent,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Mindsync(mindsync_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Mindsync(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mindsync_core::Error> for CliError {
    fn from(value: mindsync_core::Error) -> Self {
        Self::Mindsync(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Replay,
    Frontmatter,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
}

fn usage() -> &'static str {
    "mindsync-cli\n\
\n\
USAGE:\n\
  mindsync-cli [replay] [--pretty] [<script.json>|-]\n\
  mindsync-cli frontmatter [--pretty] [<document.md>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - replay feeds a JSON script of settings events through one render session and prints\n\
    every render decision, the final container style and the recorded visualization calls.\n\
  - frontmatter prints the `markmap` settings found in a document's front-matter.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "replay" => args.command = Command::Replay,
            "frontmatter" => args.command = Command::Frontmatter,
            "--pretty" => args.pretty = true,
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    root: MindmapNode,
    #[serde(default)]
    block: Value,
    #[serde(default)]
    events: Vec<ScriptEvent>,
}

#[derive(Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
enum ScriptEvent {
    /// Missing fields fall back to the global defaults.
    Global {
        #[serde(default)]
        settings: GlobalSettings,
    },
    /// Either a raw settings mapping or a markdown document whose front-matter is read.
    Document {
        #[serde(default)]
        settings: Value,
        #[serde(default)]
        markdown: Option<String>,
    },
}

#[derive(Serialize)]
struct StepOut {
    source: SettingsSource,
    decision: Option<RenderDecision>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayOut<'a> {
    steps: Vec<StepOut>,
    effective: &'a Settings,
    container: &'a ContainerStyle,
    calls: &'a [VisualizationEvent],
}

fn replay(text: &str, pretty: bool) -> Result<(), CliError> {
    let script: Script = serde_json::from_str(text)?;
    let block = Settings::from_json(SettingsSource::Block, &script.block)?;
    let mut session = RenderSession::new(
        script.root,
        block,
        RecordingVisualization::default(),
        ContainerStyle::default(),
    );

    let mut steps = Vec::with_capacity(script.events.len());
    for event in script.events {
        let step = match event {
            ScriptEvent::Global { settings } => StepOut {
                source: SettingsSource::Global,
                decision: session.update_global(settings.to_settings()?)?,
            },
            ScriptEvent::Document { settings, markdown } => {
                let layer = match markdown {
                    Some(markdown) => document_settings(&markdown)?,
                    None => Settings::from_json(SettingsSource::Document, &settings)?,
                };
                StepOut {
                    source: SettingsSource::Document,
                    decision: session.update_document(layer)?,
                }
            }
        };
        steps.push(step);
    }

    let out = ReplayOut {
        steps,
        effective: session.effective(),
        container: session.container(),
        calls: &session.visualization().events,
    };
    write_json(&out, pretty)
}

fn frontmatter(text: &str, pretty: bool) -> Result<(), CliError> {
    let settings = document_settings(text)?;
    write_json(&settings, pretty)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    match args.command {
        Command::Replay => replay(&text, args.pretty),
        Command::Frontmatter => frontmatter(&text, args.pretty),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Mindsync(mindsync_core::Error::MissingClassification { .. })) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
