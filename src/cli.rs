// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scene::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "sh-relight")]
#[command(about = "Spherical-harmonics ambient relighting viewer", long_about = None)]
pub struct Cli {
    /// Render one frame, save image and coefficients, then exit
    #[arg(long)]
    pub headless: bool,

    /// Hide the lighting panel in the viewer
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Frame width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Procedural scene to light
    #[arg(long, value_enum, default_value = "showcase")]
    pub scene: SceneKind,

    /// Coefficient file ({"shCoeffs": [...]}) to load at startup
    #[arg(long)]
    pub coeffs: Option<PathBuf>,

    /// Directory for rendered_image.png and sh_coefficients.json
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Append a timestamp to exported file names
    #[arg(long)]
    pub timestamp: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["sh-relight"]);
        assert!(!cli.headless);
        assert_eq!((cli.width, cli.height), (800, 600));
        assert_eq!(cli.scene, SceneKind::Showcase);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.coeffs.is_none());
    }

    #[test]
    fn test_headless_with_import() {
        let cli = Cli::parse_from([
            "sh-relight",
            "--headless",
            "--scene",
            "torus",
            "--coeffs",
            "in.json",
            "--width",
            "64",
        ]);
        assert!(cli.headless);
        assert_eq!(cli.scene, SceneKind::Torus);
        assert_eq!(cli.coeffs, Some(PathBuf::from("in.json")));
        assert_eq!(cli.width, 64);
    }
}
