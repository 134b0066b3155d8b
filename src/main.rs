use bckt_photo::config::{self, DEFAULT_CONFIG_FILE, DEFAULT_LANGUAGE, Settings};
use bckt_photo::imaging::RustBackend;
use bckt_photo::{output, scan};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "bckt-photo")]
#[command(about = "Create blog posts from photos")]
#[command(long_about = "\
Create blog posts from photos

Each image becomes a post directory with the image, a thumbnail bounded to
800x800, and a Markdown file whose front matter holds the title, date, slug,
tags and EXIF fields. A directory is processed recursively and its layout is
kept under the posts directory.

Titles and tags containing @ are templates filled from the photo's path:

  @dir1, @dir2, ...   enclosing directories, closest first
  @filename           beach.jpg
  @basename           beach
  @ext                jpg

Run 'bckt-photo --print-config' for a documented bckt-photo.yaml.")]
#[command(version = version_string())]
struct Cli {
    /// Image file or directory of images
    #[arg(short, long, required_unless_present = "print_config")]
    image: Option<PathBuf>,

    /// Post title, literal or template
    #[arg(short, long)]
    title: Option<String>,

    /// Extra tag, literal or template (repeatable)
    #[arg(short = 'g', long = "tag")]
    tags: Vec<String>,

    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Posts directory (overrides posts_dir from the config)
    #[arg(short, long)]
    posts: Option<PathBuf>,

    /// Post language
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Print a documented sample config and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.print_config {
        println!(
            "{}",
            output::format_config_source(&cli.config, cli.config.exists())
        );
        print!("{}", config::stock_config_yaml());
        return Ok(());
    }

    let Some(input) = cli.image else {
        return Err("--image is required".into());
    };

    let settings = Settings::from_config(config::load_or_default(&cli.config))
        .with_posts_dir(cli.posts)
        .with_language(cli.lang)
        .with_title(cli.title)
        .with_tags(cli.tags);

    let working_dir = std::env::current_dir()?;
    let summary = scan::run(&RustBackend::new(), &settings, &input, &working_dir)?;
    output::print_batch_summary(&summary);
    Ok(())
}
