use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use guide_gen::error::GuideError;
use guide_gen::model::{OutputConfig, DEFAULT_LOGO_WIDTH_MM};
use guide_gen::outline;

/// Generates the UK visa calculator user guide as a PDF.
///
/// Fonts must be present under `assets/fonts` relative to the crate or next
/// to the binary, or be provided via the `GUIDE_GEN_FONTS_DIR` environment
/// variable.
#[derive(Parser)]
#[command(author, version, about = "Generates the UK visa calculator user guide PDF")]
struct Cli {
    /// Path of the generated document; parent directories are created.
    #[arg(
        long,
        value_name = "FILE",
        default_value = "docs/UK_Visa_Calculator_User_Guide.pdf"
    )]
    output: PathBuf,

    /// Logo image placed at the top of the guide; skipped when missing.
    #[arg(long, value_name = "FILE", default_value = "public/assets/kc_logo.png")]
    logo: PathBuf,

    /// Rendered logo width in millimetres.
    #[arg(long, value_name = "MM", default_value_t = DEFAULT_LOGO_WIDTH_MM)]
    logo_width_mm: f64,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), GuideError> {
    let config = OutputConfig::new(&cli.output)
        .with_logo(cli.logo.clone())
        .with_logo_width_mm(cli.logo_width_mm);

    let mut builder = outline::build_guide(&config)?;
    let path = builder.render_to_file(config.output())?;
    println!("{}", path.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
