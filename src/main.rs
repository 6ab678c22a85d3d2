use clap::{Args, Parser, Subcommand};
use ecbviz::cli::{run_injection, run_interactive, show_blocks, InjectOptions, ShowSource};
use ecbviz::config::{
    parse_block_size, parse_filler, BlockSize, HexCase, OutputFormat, RenderOptions,
    DEFAULT_PLACEHOLDER, DEFAULT_TARGET,
};
use ecbviz::{EcbVizError, Result};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("ECBVIZ_VERSION");
const BUILD: &str = env!("ECBVIZ_BUILD");
const PROFILE: &str = env!("ECBVIZ_PROFILE");
const GIT_HASH: &str = env!("ECBVIZ_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH)
    })
}

#[derive(Parser)]
#[command(name = "ecbviz")]
#[command(author, about = "Visualize block boundaries and prefix injection for ECB attacks", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct RenderArgs {
    /// Block size in bytes
    #[arg(long, default_value = "16", value_parser = parse_block_size_arg)]
    block_size: BlockSize,

    /// Hex digit case (lower or upper)
    #[arg(long, default_value = "lower", value_parser = parse_hex_case)]
    hex_case: HexCase,

    /// Character shown for non-printable bytes
    #[arg(long, default_value_t = DEFAULT_PLACEHOLDER)]
    placeholder: char,

    /// Hide the ASCII column
    #[arg(long)]
    no_ascii: bool,

    /// Hide the byte offset row
    #[arg(long)]
    no_positions: bool,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            block_size: self.block_size,
            show_ascii: !self.no_ascii,
            show_positions: !self.no_positions,
            placeholder: self.placeholder,
            hex_case: self.hex_case,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a target before and after prefix injection
    #[command(alias = "i")]
    Inject {
        /// Number of filler bytes to prepend
        count: usize,

        /// Target text to inject in front of
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Filler byte: one ASCII character or 0x-prefixed hex
        #[arg(long, default_value = "A", value_parser = parse_filler_arg)]
        filler: u8,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: OutputFormat,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Split text or a file into blocks
    #[command(alias = "s")]
    Show {
        /// Text to visualize
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,

        /// Read bytes from a file instead
        #[arg(long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Prompt for injection counts until EOF or `quit`
    #[command(alias = "r")]
    Interactive {
        /// Target text to inject in front of
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Filler byte: one ASCII character or 0x-prefixed hex
        #[arg(long, default_value = "A", value_parser = parse_filler_arg)]
        filler: u8,

        #[command(flatten)]
        render: RenderArgs,
    },
}

fn parse_block_size_arg(s: &str) -> std::result::Result<BlockSize, String> {
    parse_block_size(s).map_err(|e| format!("{}", e))
}

fn parse_hex_case(s: &str) -> std::result::Result<HexCase, String> {
    s.parse().map_err(|e: EcbVizError| format!("{}", e))
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse().map_err(|e: EcbVizError| format!("{}", e))
}

fn parse_filler_arg(s: &str) -> std::result::Result<u8, String> {
    parse_filler(s).map_err(|e| format!("{}", e))
}

fn interactive(options: &InjectOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let served = run_interactive(stdin.lock(), &mut stdout, options)?;
    tracing::debug!(served, "interactive session ended");
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Inject {
            count,
            target,
            filler,
            format,
            render,
        } => {
            let options = InjectOptions {
                target,
                filler,
                format,
                render: render.options(),
            };
            print!("{}", run_injection(count, &options)?);
            Ok(())
        }

        Commands::Show { text, file, render } => {
            let source = match (&text, &file) {
                (_, Some(path)) => ShowSource::File(path),
                (Some(text), None) => ShowSource::Text(text),
                (None, None) => {
                    return Err(EcbVizError::InvalidArgument(
                        "provide TEXT or --file".into(),
                    ))
                }
            };
            print!("{}", show_blocks(source, &render.options())?);
            Ok(())
        }

        Commands::Interactive {
            target,
            filler,
            render,
        } => interactive(&InjectOptions {
            target,
            filler,
            render: render.options(),
            ..Default::default()
        }),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.version {
        println!("ecbviz {}", get_version());
        return ExitCode::SUCCESS;
    }

    // No subcommand runs the interactive demo against the sample target
    let result = match cli.command {
        Some(command) => run(command),
        None => interactive(&InjectOptions::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
