use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gifsketch", version)]
struct Cli {
    /// JSON config supplying defaults for every stage; flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log per-file detail.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split an animated GIF into composited frame images.
    Split(SplitArgs),
    /// Convert every image in a folder into a 1-bit byte array header.
    Encode(EncodeArgs),
    /// Splice frame headers into a sketch template.
    Assemble(AssembleArgs),
    /// Write a small demo animation to try the pipeline on.
    Sample(SampleArgs),
    /// Write a starting sketch template with both placeholders.
    InitTemplate(InitTemplateArgs),
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Animated image to split.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Folder for frame_NNN images.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Digits in the frame number.
    #[arg(long)]
    pad: Option<usize>,

    /// Frame image format.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Folder of images to convert.
    #[arg(long)]
    in_dir: Option<PathBuf>,

    /// Folder for the generated .h files.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Display width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Display height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Emit 0 for lit pixels.
    #[arg(long)]
    invert: bool,
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Sketch template containing the placeholder lines.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Folder holding frame_NNN.h files.
    #[arg(long)]
    headers: Option<PathBuf>,

    /// Output sketch path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Digits in the header frame number.
    #[arg(long)]
    pad: Option<usize>,

    /// Header filename prefix.
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Output GIF path.
    #[arg(long, default_value = "animation.gif")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InitTemplateArgs {
    /// Output template path.
    #[arg(long, default_value = "Template/animation.ino")]
    out: PathBuf,

    /// Replace an existing file.
    #[arg(long)]
    force: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Gif,
    Bmp,
}

impl From<FormatChoice> for gifsketch::FrameFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Png => Self::Png,
            FormatChoice::Gif => Self::Gif,
            FormatChoice::Bmp => Self::Bmp,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cfg = match &cli.config {
        Some(path) => gifsketch::Config::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => gifsketch::Config::default(),
    };

    match cli.cmd {
        Command::Split(args) => cmd_split(args, cfg.extract),
        Command::Encode(args) => cmd_encode(args, cfg.encode),
        Command::Assemble(args) => cmd_assemble(args, cfg.assemble),
        Command::Sample(args) => Ok(gifsketch::write_sample_gif_file(&args.out)?),
        Command::InitTemplate(args) => {
            Ok(gifsketch::write_default_template(&args.out, args.force)?)
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}

fn cmd_split(args: SplitArgs, mut opts: gifsketch::ExtractOpts) -> anyhow::Result<()> {
    if let Some(p) = args.in_path {
        opts.input = p;
    }
    if let Some(d) = args.out_dir {
        opts.out_dir = d;
    }
    if let Some(n) = args.pad {
        opts.pad_width = n;
    }
    if let Some(f) = args.format {
        opts.format = f.into();
    }

    let report = gifsketch::extract_frames(&opts)
        .with_context(|| format!("split '{}'", opts.input.display()))?;
    println!(
        "extracted {} frame(s) to {}",
        report.written.len(),
        opts.out_dir.display()
    );
    Ok(())
}

fn cmd_encode(args: EncodeArgs, mut opts: gifsketch::EncodeOpts) -> anyhow::Result<()> {
    if let Some(d) = args.in_dir {
        opts.in_dir = d;
    }
    if let Some(d) = args.out_dir {
        opts.out_dir = d;
    }
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    opts.invert |= args.invert;

    let report = gifsketch::encode_dir(&opts)
        .with_context(|| format!("encode images in '{}'", opts.in_dir.display()))?;
    println!(
        "converted {} image(s), {} failed, {} ignored",
        report.written.len(),
        report.failed.len(),
        report.ignored.len()
    );
    Ok(())
}

fn cmd_assemble(args: AssembleArgs, mut opts: gifsketch::AssembleOpts) -> anyhow::Result<()> {
    if let Some(t) = args.template {
        opts.template = t;
    }
    if let Some(d) = args.headers {
        opts.header_dir = d;
    }
    if let Some(o) = args.out {
        opts.output = o;
    }
    if let Some(n) = args.pad {
        opts.pad_width = n;
    }
    if let Some(p) = args.prefix {
        opts.header_prefix = p;
    }

    let report = gifsketch::assemble(&opts).context("assemble sketch")?;
    println!(
        "wrote {} with {} frame(s)",
        report.output.display(),
        report.frames.len()
    );
    Ok(())
}
