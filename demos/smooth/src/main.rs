use std::path::PathBuf;

use argh::FromArgs;
use convkit::{BlurMode, Pipeline, PipelineConfig};

/// Blur a BMP image, then sharpen the blurred result
#[derive(FromArgs)]
struct Args {
    /// path to the source BMP image
    #[argh(positional)]
    src_path: PathBuf,

    /// blur before sharpening: plain or filtered
    #[argh(option, short = 'm', default = "BlurMode::Plain", from_str_fn(parse_mode))]
    mode: BlurMode,

    /// one character mode flag, '1' selects the plain blur and anything else the
    /// filtered one; overrides --mode
    #[argh(option, short = 'f')]
    flag: Option<char>,

    /// path of the blurred image
    #[argh(option)]
    blur_output: Option<PathBuf>,

    /// path of the sharpened image
    #[argh(option)]
    sharpen_output: Option<PathBuf>,

    /// directory the output images are written to
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,
}

fn parse_mode(value: &str) -> Result<BlurMode, String> {
    value.parse().map_err(|e| format!("{e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mode = args.flag.map_or(args.mode, BlurMode::from_flag);

    let mut config = PipelineConfig::new(mode);
    if let Some(path) = args.blur_output {
        config = config.with_blur_output(path);
    }
    if let Some(path) = args.sharpen_output {
        config = config.with_sharpen_output(path);
    }
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }

    let pipeline = Pipeline::new(config);
    log::info!(
        "running the {mode:?} pipeline on {}, writing {} and {}",
        args.src_path.display(),
        pipeline.config().blur_output.display(),
        pipeline.config().sharpen_output.display()
    );
    pipeline.run_file(&args.src_path)?;

    Ok(())
}
