use clap::Parser;
use polyblog::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyblog")]
#[command(version)]
#[command(about = "Static site generator for multilingual blogs kept in git")]
#[command(long_about = "\
Static site generator for multilingual blogs kept in git

Each directory is a post; each <locale>.md file inside it is a translation.
The post date is the time of the commit that first added the file.

Source structure:

  blog/
  ├── .polyblog.toml         # Optional config (author, output_dir, git)
  ├── hello-world/
  │   ├── en_US.md           # → dist/en_US/hello world.html
  │   └── fr_FR.md           # → dist/fr_FR/hello world.html
  └── second-post/
      └── en_US.md           # → dist/en_US/second post.html

Every locale also gets an index.html listing its posts. Hidden entries and
the output directory are skipped; any other file aborts the build.")]
struct Cli {
    /// Git work tree containing the posts
    source: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let site_config = config::load_config(&cli.source)?;
    let output_root = site_config.output_root(&cli.source);

    println!("==> Building {}", cli.source.display());
    let summary = pipeline::build(&cli.source, &site_config, |event| {
        output::print_build_event(event, &output_root)
    })?;
    output::print_summary(&summary);

    Ok(())
}
