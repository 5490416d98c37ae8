use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod meeting;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,
    },
    /// Create a meeting, optionally with a live stream and co-hosts
    Create {
        #[arg(long, default_value = "PUBLIC")]
        waiting_room_level: String,

        /// Attach a live stream with this title
        #[arg(long)]
        stream_title: Option<String>,

        #[arg(long, default_value = "")]
        stream_description: String,

        #[arg(long, default_value = "PUBLIC")]
        stream_access_level: String,

        /// Co-host email, repeatable
        #[arg(long)]
        cohost: Vec<String>,

        /// Save the created meeting to a JSON snapshot file
        #[arg(long, action, default_value = "false")]
        save: bool,
    },
    /// Fetch a meeting by id
    Get {
        #[arg(long)]
        id: String,
    },
    /// List meetings
    List {
        #[arg(long, default_value = "50")]
        limit: u32,

        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// Delete a meeting by id
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await;
        }
        Some(Command::Create {
            waiting_room_level,
            stream_title,
            stream_description,
            stream_access_level,
            cohost,
            save,
        }) => {
            meeting::create(
                &waiting_room_level,
                stream_title.as_deref(),
                &stream_description,
                &stream_access_level,
                &cohost,
                save,
            )
            .await?;
        }
        Some(Command::Get { id }) => {
            meeting::get(&id).await?;
        }
        Some(Command::List { limit, offset }) => {
            meeting::list(limit, offset).await?;
        }
        Some(Command::Delete { id }) => {
            meeting::delete(&id).await?;
        }
        None => {}
    }

    Ok(())
}
