use anyhow::Result;
use bookshelf_config::{Config, ConfigPersistence};
use clap::{Arg, Command};

mod commands;

fn build_cli() -> Command {
    Command::new("bookshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Directory-backed personal book collection manager")
        .arg(
            Arg::new("collection")
                .short('C')
                .long("collection")
                .value_name("DIR")
                .help("Collection directory (overrides the configured default)")
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List the books in the collection")
                .arg(
                    Arg::new("sort")
                        .short('s')
                        .long("sort")
                        .value_name("ORDER")
                        .help("Display order")
                        .value_parser(["title", "author", "year", "pages", "added"])
                        .default_value("title"),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Add a book to the collection")
                .arg(Arg::new("title").short('t').long("title").value_name("TITLE").help("Book title"))
                .arg(Arg::new("author").short('a').long("author").value_name("AUTHOR").help("Book author"))
                .arg(Arg::new("year").short('y').long("year").value_name("YEAR").help("Year published"))
                .arg(Arg::new("pages").short('p').long("pages").value_name("PAGES").help("Page count"))
                .arg(
                    Arg::new("isbn")
                        .short('i')
                        .long("isbn")
                        .value_name("ISBN")
                        .help("Pre-fill missing fields from the online catalog"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a book from the collection")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("The book's date-added identifier"))
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Skip confirmation prompt")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Look up an ISBN without changing anything")
                .arg(Arg::new("isbn").required(true).value_name("ISBN").help("The ISBN to look up")),
        )
        .subcommand(
            Command::new("export")
                .about("Export the collection as JSON")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file path")
                        .default_value("collection_export.json"),
                ),
        )
}

/// Loads the config, falling back to defaults so a broken config file never
/// makes the binary unusable.
fn load_config() -> Config {
    let persistence = match ConfigPersistence::at_default_location() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Warning: {}", e);
            return Config::default();
        }
    };
    match persistence.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {} — using default settings", e);
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    let config = load_config();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.general.log_level.to_string()),
    )
    .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("list", sub_matches)) => commands::list_books(&config, sub_matches),
        Some(("add", sub_matches)) => commands::add_book(&config, sub_matches),
        Some(("delete", sub_matches)) => commands::delete_book(&config, sub_matches),
        Some(("lookup", sub_matches)) => commands::lookup_isbn(&config, sub_matches),
        Some(("export", sub_matches)) => commands::export_collection(&config, sub_matches),
        _ => commands::run_tui(&config, &matches),
    }
}
