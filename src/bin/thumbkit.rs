use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thumbkit::remote::FieldValue;
use thumbkit::{FormFiles, ThumbnailForm, TitleFont, Upload};

#[derive(Parser, Debug)]
#[command(name = "thumbkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a local preview as a PNG.
    Preview(PreviewArgs),
    /// Print the multipart fields that would be sent to the remote generator.
    Fields(FieldsArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Form settings JSON (defaults apply when omitted).
    #[arg(long)]
    form: Option<PathBuf>,

    /// Background screenshot.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Title text (overrides the form's title).
    #[arg(long)]
    title: Option<String>,

    /// Title font file; system fonts are searched when omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Extra directory to search for title fonts (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FieldsArgs {
    /// Form settings JSON (defaults apply when omitted).
    #[arg(long)]
    form: Option<PathBuf>,

    /// Background screenshot upload.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Channel logo upload.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Game logo upload.
    #[arg(long = "game-logo")]
    game_logo: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Fields(args) => cmd_fields(args),
    }
}

fn load_form(path: Option<&Path>) -> anyhow::Result<ThumbnailForm> {
    Ok(match path {
        Some(p) => ThumbnailForm::from_path(p)?,
        None => ThumbnailForm::default(),
    })
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut form = load_form(args.form.as_deref())?;
    if let Some(title) = args.title {
        form.title = Some(title);
    }

    let background = args
        .background
        .as_deref()
        .map(thumbkit::decode_image_file)
        .transpose()?;

    let wants_title = form.title.as_deref().is_some_and(|t| !t.trim().is_empty());
    let font = match (&args.font, wants_title) {
        (Some(path), _) => Some(TitleFont::from_path(path)?),
        (None, true) => match TitleFont::resolve_system(&args.font_dirs) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!(error = %e, "no title font found; rendering without title");
                None
            }
        },
        (None, false) => None,
    };

    let request = form.to_request(background, font)?;
    let canvas = thumbkit::render(&request);
    canvas.write_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fields(args: FieldsArgs) -> anyhow::Result<()> {
    let form = load_form(args.form.as_deref())?;
    form.validate()?;

    let upload = |p: Option<PathBuf>| p.map(Upload::from_path).transpose();
    let files = FormFiles {
        screenshot: upload(args.background)?,
        logo: upload(args.logo)?,
        game_logo: upload(args.game_logo)?,
    };

    let fields: Vec<serde_json::Value> = thumbkit::submission_fields(&form, &files)
        .into_iter()
        .map(|f| match f.value {
            FieldValue::Text(value) => serde_json::json!({ "name": f.name, "value": value }),
            FieldValue::File(u) => serde_json::json!({
                "name": f.name,
                "file_name": u.file_name,
                "bytes": u.bytes.len(),
            }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}
