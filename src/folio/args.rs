use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Browse, search and lay out a static photo gallery", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub site: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List years, newest first
    Years,

    /// List known locations
    Locations,

    /// List images
    #[command(alias = "ls")]
    List {
        /// Only images from this location ("all" for every location)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Search images (e.g. `style:portrait sunset`)
    #[command(alias = "s")]
    Search {
        /// Query terms; `facet:value` tokens filter on metadata
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        #[arg(short, long)]
        location: Option<String>,
    },

    /// Show the tag suggestions built from image metadata
    Tags,

    /// Compute the masonry layout for a viewport
    Layout {
        /// Viewport width in pixels
        #[arg(short, long, default_value_t = 1280.0)]
        width: f64,

        /// Gallery container width (defaults to the viewport width)
        #[arg(long)]
        container: Option<f64>,

        /// Scroll offset; when given, lists the images that would load
        #[arg(long)]
        scroll_top: Option<f64>,

        /// Viewport height used with --scroll-top
        #[arg(long, default_value_t = 900.0)]
        viewport_height: f64,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Open the lightbox on an image
    #[command(alias = "v")]
    View {
        /// Image id (e.g. img/2023-05-Rome/a.jpg) or filename
        id: String,

        /// Images to step forward (negative steps back)
        #[arg(short = 'n', long, default_value_t = 0, allow_negative_numbers = true)]
        steps: i64,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Print the metadata URL of every category
    Urls,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., base_url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_terms_and_globals() {
        let cli = Cli::parse_from(["folio", "search", "style:portrait", "sunset", "--json"]);
        assert!(cli.json);
        match cli.command {
            Some(Commands::Search { terms, location }) => {
                assert_eq!(terms, vec!["style:portrait", "sunset"]);
                assert!(location.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn view_accepts_negative_steps() {
        let cli = Cli::parse_from(["folio", "view", "a.jpg", "--steps", "-2"]);
        match cli.command {
            Some(Commands::View { steps, .. }) => assert_eq!(steps, -2),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["folio", "--site", "/tmp/site"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.site, Some(PathBuf::from("/tmp/site")));
    }
}
