// Command-line interface

pub mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "po-agent",
    version,
    about = "Product Owner assistant: feedback analysis, user stories and feature prioritization"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Relay endpoint to call (overrides config and PO_AGENT_RELAY_URL)
    #[arg(long, global = true)]
    pub relay_url: Option<String>,

    /// Run the relay in-process instead of calling a server (needs LOVABLE_API_KEY)
    #[arg(long, global = true)]
    pub local: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the relay HTTP server
    Serve {
        /// Bind address, e.g. 0.0.0.0:8787
        #[arg(long)]
        bind: Option<String>,
    },

    /// Analyze customer feedback
    Analyze {
        /// Feedback text
        text: Option<String>,

        /// Read feedback from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Append a built-in sample (1-3); repeatable
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        sample: Vec<u8>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Split a feature description into user stories
    Stories {
        /// Feature description
        description: String,

        /// Main persona (utilisateur, admin, chef_projet, developpeur, or free text)
        #[arg(long, default_value = crate::views::samples::DEFAULT_PERSONA)]
        persona: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score features with RICE and MoSCoW
    Prioritize {
        /// Feature name; repeatable. Without any, the default board is used.
        #[arg(long = "feature")]
        features: Vec<String>,

        /// How to present the board
        #[arg(long, value_enum, default_value_t = Framework::Rice)]
        framework: Framework,

        /// Show the local board without asking the model
        #[arg(long)]
        no_ai: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List relay actions and their tools
    Actions,
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Framework {
    Rice,
    Moscow,
}
