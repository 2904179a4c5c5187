//! notestore CLI
//!
//! Command-line interface over a configured note store.

use clap::{Parser, Subcommand};
use notestore::{
    open_store, AnyStore, Backend, CancellationToken, Config, Note, NoteIterator, NoteService,
    Pagination,
};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// notestore CLI
#[derive(Parser, Debug)]
#[command(name = "notestore-cli")]
#[command(about = "CLI for the notestore note record store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = ".")]
    data_dir: String,

    /// Snapshot file name inside the data directory
    #[arg(short, long, default_value = "notes.pb")]
    file: String,

    /// Use a throwaway in-memory store instead of the snapshot file
    #[arg(long)]
    memory: bool,

    /// Print notes as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a note
    Create {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Mark the note as favorite
        #[arg(long)]
        favorite: bool,

        /// Use this id instead of generating one
        #[arg(long)]
        id: Option<Uuid>,
    },

    /// Show a note
    Get {
        id: Uuid,
    },

    /// Update the given fields of a note
    Update {
        id: Uuid,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(long)]
        favorite: Option<bool>,
    },

    /// Delete a note
    Delete {
        id: Uuid,
    },

    /// List one page of notes
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,

        #[arg(long, default_value_t = 25)]
        size: u64,

        /// id, title or created_date
        #[arg(long, default_value = "id")]
        sort: String,

        #[arg(long)]
        descending: bool,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,notestore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .backend(if args.memory { Backend::Memory } else { Backend::File })
        .data_dir(&args.data_dir)
        .file_name(&args.file)
        .build();

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let service = NoteService::new(store);
    if let Err(e) = run(&service, args.command, args.json) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(service: &NoteService<AnyStore>, command: Commands, json: bool) -> notestore::Result<()> {
    let token = CancellationToken::new();

    match command {
        Commands::Create { title, content, favorite, id } => {
            let note = Note {
                id: id.unwrap_or_else(Uuid::nil),
                title,
                content,
                is_favorite: Some(favorite),
                ..Note::default()
            };
            print_note(&service.create(&token, note)?, json);
        }
        Commands::Get { id } => {
            print_note(&service.get(&token, id)?, json);
        }
        Commands::Update { id, title, content, favorite } => {
            let note = Note {
                id,
                title,
                content,
                is_favorite: favorite,
                ..Note::default()
            };
            print_note(&service.update(&token, note)?, json);
        }
        Commands::Delete { id } => {
            service.delete(&token, id)?;
            println!("deleted {id}");
        }
        Commands::List { page, size, sort, descending } => {
            let pagination =
                Pagination::from_query(Some(page), Some(size), Some(&sort), Some(!descending));
            let mut iter = service.fetch(&token, pagination)?;
            let notes = iter.drain();
            iter.close()?;

            if json {
                println!("{}", to_json(&notes));
            } else {
                println!(
                    "page {} of {} ({} notes)\n",
                    pagination.page,
                    iter.total_page(),
                    iter.total_count()
                );
                for note in &notes {
                    println!("{note}");
                }
            }
        }
    }

    Ok(())
}

fn print_note(note: &Note, json: bool) {
    if json {
        println!("{}", to_json(note));
    } else {
        print!("{note}");
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
