use std::path::{Path, PathBuf};
use std::str::FromStr;

use convkit_image::{CpuAllocator, ImageAllocator};
use convkit_imgproc::filter::Filter3;
use convkit_io::{
    functional::{read_image_bmp, write_image_bmp},
    BmpImage, IoError,
};

use crate::error::PipelineError;
use crate::pass::convolution_pass;

/// Which blur runs before the sharpen pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlurMode {
    /// Plain 3x3 box blur.
    #[default]
    Plain,
    /// Box blur that drops the darkest and brightest sample of every neighborhood.
    Filtered,
}

impl BlurMode {
    /// Select the mode from a one character flag: `'1'` is plain, anything else filtered.
    pub fn from_flag(flag: char) -> Self {
        if flag == '1' {
            BlurMode::Plain
        } else {
            BlurMode::Filtered
        }
    }

    /// The filter of the first pass.
    pub fn filter(&self) -> Filter3 {
        match self {
            BlurMode::Plain => Filter3::Blur,
            BlurMode::Filtered => Filter3::BlurFiltered,
        }
    }

    /// Default file names of the blurred and the sharpened artifact.
    pub fn default_outputs(&self) -> (&'static str, &'static str) {
        match self {
            BlurMode::Plain => ("Blur.bmp", "Sharpen.bmp"),
            BlurMode::Filtered => ("Filtered_Blur.bmp", "Filtered_Sharpen.bmp"),
        }
    }
}

impl FromStr for BlurMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "blur" => Ok(BlurMode::Plain),
            "filtered" | "filtered_blur" => Ok(BlurMode::Filtered),
            _ => Err(PipelineError::InvalidBlurMode(s.to_string())),
        }
    }
}

/// Configuration of a [`Pipeline`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// The blur of the first pass.
    pub mode: BlurMode,
    /// Where the blurred image is written.
    pub blur_output: PathBuf,
    /// Where the sharpened image is written.
    pub sharpen_output: PathBuf,
}

impl PipelineConfig {
    /// Create a configuration writing the default artifact names of `mode`
    /// into the current directory.
    pub fn new(mode: BlurMode) -> Self {
        let (blur_output, sharpen_output) = mode.default_outputs();
        Self {
            mode,
            blur_output: blur_output.into(),
            sharpen_output: sharpen_output.into(),
        }
    }

    /// Set the path of the blurred artifact.
    pub fn with_blur_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.blur_output = path.into();
        self
    }

    /// Set the path of the sharpened artifact.
    pub fn with_sharpen_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.sharpen_output = path.into();
        self
    }

    /// Place both artifacts inside `dir`, keeping their file names.
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.blur_output = dir.join(&self.blur_output);
        self.sharpen_output = dir.join(&self.sharpen_output);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(BlurMode::default())
    }
}

/// Blur a source image, then sharpen the blurred result, writing both.
///
/// The sharpen pass always consumes the output of the blur pass, never the
/// original pixels.
///
/// # Example
///
/// ```
/// use convkit::{BlurMode, Pipeline, PipelineConfig};
/// use convkit::image::{CpuAllocator, Image};
/// use convkit::io::BmpImage;
///
/// let image = Image::<u8, 3>::from_size_val([5, 5].into(), 128, CpuAllocator).unwrap();
/// let mut bitmap = BmpImage::from_rgb8(&image).unwrap();
///
/// let mut artifacts = Vec::new();
/// Pipeline::new(PipelineConfig::new(BlurMode::Plain))
///     .run(&mut bitmap, |path, bmp| {
///         artifacts.push((path.to_path_buf(), bmp.clone()));
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(artifacts.len(), 2);
/// ```
pub struct Pipeline<A: ImageAllocator = CpuAllocator> {
    config: PipelineConfig,
    alloc: A,
}

impl Pipeline {
    /// Create a pipeline using the system allocator.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_allocator(config, CpuAllocator)
    }
}

impl<A: ImageAllocator> Pipeline<A> {
    /// Create a pipeline whose scratch images come from `alloc`.
    pub fn with_allocator(config: PipelineConfig, alloc: A) -> Self {
        Self { config, alloc }
    }

    /// The configuration of the pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run both passes on `bitmap` in place.
    ///
    /// After each pass `write` is called with the configured output path and the
    /// current state of `bitmap`.
    ///
    /// # Arguments
    ///
    /// * `bitmap` - The source container; it holds the sharpened result on success.
    /// * `write` - Persists one artifact.
    ///
    /// # Errors
    ///
    /// Stops at the first failing pass or write. A failing pass leaves `bitmap` as
    /// it was before that pass.
    pub fn run<W>(&self, bitmap: &mut BmpImage, mut write: W) -> Result<(), PipelineError>
    where
        W: FnMut(&Path, &BmpImage) -> Result<(), IoError>,
    {
        let blur = self.config.mode.filter();
        convolution_pass(bitmap, blur, self.alloc.clone())?;
        write(self.config.blur_output.as_path(), &*bitmap)?;
        log::info!("{blur} result written to {}", self.config.blur_output.display());

        convolution_pass(bitmap, Filter3::Sharpen, self.alloc.clone())?;
        write(self.config.sharpen_output.as_path(), &*bitmap)?;
        log::info!(
            "{} result written to {}",
            Filter3::Sharpen,
            self.config.sharpen_output.display()
        );

        Ok(())
    }

    /// Read a BMP file and run both passes on it, writing the artifacts as BMP files.
    ///
    /// # Arguments
    ///
    /// * `src_path` - The path to the source BMP image.
    pub fn run_file(&self, src_path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let mut bitmap = read_image_bmp(src_path)?;
        self.run(&mut bitmap, |path, bmp| write_image_bmp(path, bmp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_mode_from_flag() {
        assert_eq!(BlurMode::from_flag('1'), BlurMode::Plain);
        assert_eq!(BlurMode::from_flag('2'), BlurMode::Filtered);
        assert_eq!(BlurMode::from_flag('0'), BlurMode::Filtered);
    }

    #[test]
    fn test_blur_mode_from_str() -> Result<(), PipelineError> {
        assert_eq!("plain".parse::<BlurMode>()?, BlurMode::Plain);
        assert_eq!("Filtered".parse::<BlurMode>()?, BlurMode::Filtered);
        assert!(matches!(
            "median".parse::<BlurMode>(),
            Err(PipelineError::InvalidBlurMode(s)) if s == "median"
        ));
        Ok(())
    }

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::new(BlurMode::Filtered);
        assert_eq!(config.blur_output, PathBuf::from("Filtered_Blur.bmp"));
        assert_eq!(config.sharpen_output, PathBuf::from("Filtered_Sharpen.bmp"));

        let config = PipelineConfig::default().with_output_dir("out");
        assert_eq!(config.mode, BlurMode::Plain);
        assert_eq!(config.blur_output, Path::new("out").join("Blur.bmp"));
        assert_eq!(config.sharpen_output, Path::new("out").join("Sharpen.bmp"));

        let config = PipelineConfig::default()
            .with_blur_output("a.bmp")
            .with_sharpen_output("b.bmp");
        assert_eq!(config.blur_output, PathBuf::from("a.bmp"));
        assert_eq!(config.sharpen_output, PathBuf::from("b.bmp"));
        assert_eq!(Pipeline::new(config.clone()).config(), &config);
    }

    #[test]
    fn test_mode_filters() {
        assert_eq!(BlurMode::Plain.filter(), Filter3::Blur);
        assert_eq!(BlurMode::Filtered.filter(), Filter3::BlurFiltered);
    }
}
