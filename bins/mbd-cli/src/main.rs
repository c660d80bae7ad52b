//! mbd CLI - query the mbd Farcaster API from the terminal
//!
//! Settings are read from `MBD_API_KEY`, `MBD_APP_NAME`, `MBD_APP_URL` and
//! `MBD_DEBUG`.

use clap::{Parser, Subcommand};
use mbd_client::{EventType, LabelCategory};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;

/// Farcaster feeds, search, AI labels and user similarity via mbd
#[derive(Parser)]
#[command(name = "mbd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (same as MBD_DEBUG=true)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Personalized "for you" cast feed
    ForYou {
        /// Farcaster user id (fid)
        user_id: String,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Trending casts
    Trending {
        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Popular casts
    Popular {
        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Semantic cast search
    Search {
        /// Search text
        query: String,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// AI labels for casts
    LabelsItems {
        /// Cast identifiers
        #[arg(required = true)]
        items: Vec<String>,

        /// Label category (topics, sentiment, emotion, moderation, all)
        #[arg(short, long, default_value = "all")]
        category: LabelCategory,
    },

    /// AI labels for free text
    LabelsText {
        /// Text inputs
        #[arg(required = true)]
        texts: Vec<String>,

        /// Label category (topics, sentiment, emotion, moderation, all)
        #[arg(short, long, default_value = "all")]
        category: LabelCategory,
    },

    /// Casts with the highest score for a label
    TopItems {
        /// Label name, e.g. "spam"
        label: String,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Users similar to a user
    SimilarUsers {
        /// Farcaster user id (fid)
        user_id: String,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Semantic user search
    SearchUsers {
        /// Search text
        query: String,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Users engaging with a channel
    ChannelUsers {
        /// Channel name
        channel: String,

        /// Engagement type (like, share, comment, all)
        #[arg(short, long, default_value = "all")]
        event: EventType,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Users engaging with a cast
    ItemUsers {
        /// Cast identifier
        item_id: String,

        /// Engagement type (like, share, comment, all)
        #[arg(short, long, default_value = "all")]
        event: EventType,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Users engaging with a topic
    TopicUsers {
        /// Topic name
        topic: String,

        /// Engagement type (like, share, comment, all)
        #[arg(short, long, default_value = "all")]
        event: EventType,

        /// Extra body option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match commands::settings(cli.verbose) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    // MBD_DEBUG alone is enough to get request logs
    if settings.debug {
        tracing_subscriber::fmt()
            .with_env_filter("mbd_client=debug,mbd=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let client = match commands::client(&settings) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    let format = cli.format.as_str();

    let result = match cli.command {
        Commands::ForYou { user_id, opts } => commands::for_you(&client, &user_id, &opts, format).await,
        Commands::Trending { opts } => commands::trending(&client, &opts, format).await,
        Commands::Popular { opts } => commands::popular(&client, &opts, format).await,
        Commands::Search { query, opts } => commands::search(&client, &query, &opts, format).await,
        Commands::LabelsItems { items, category } => {
            commands::labels_items(&client, &items, category, format).await
        }
        Commands::LabelsText { texts, category } => {
            commands::labels_text(&client, &texts, category, format).await
        }
        Commands::TopItems { label, opts } => commands::top_items(&client, &label, &opts, format).await,
        Commands::SimilarUsers { user_id, opts } => {
            commands::similar_users(&client, &user_id, &opts, format).await
        }
        Commands::SearchUsers { query, opts } => {
            commands::search_users(&client, &query, &opts, format).await
        }
        Commands::ChannelUsers { channel, event, opts } => {
            commands::channel_users(&client, &channel, event, &opts, format).await
        }
        Commands::ItemUsers { item_id, event, opts } => {
            commands::item_users(&client, &item_id, event, &opts, format).await
        }
        Commands::TopicUsers { topic, event, opts } => {
            commands::topic_users(&client, &topic, event, &opts, format).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
