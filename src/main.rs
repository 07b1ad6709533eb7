use anyhow::Result;
use clap::Parser;
use log::info;

use sh_relight::cli::Cli;
use sh_relight::session::Session;
use sh_relight::viewer;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.headless {
        let mut session = Session::from_cli(&cli)?;
        let paths = session.render_and_save()?;
        let stats = session.last_stats();
        info!("{} triangles, {} fragments", stats.triangles, stats.fragments);
        println!("Saved {}", paths.image.display());
        println!("Saved {}", paths.coefficients.display());
        return Ok(());
    }

    viewer::run(&cli)
}
