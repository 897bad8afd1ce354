use anyhow::{bail, Context, Result};
use bookshelf_config::Config;
use bookshelf_core::{Book, BookId};
use bookshelf_lookup::{MetadataSource, OpenLibrarySource};
use bookshelf_store::{Collection, SortOrder};
use chrono::{DateTime, Local};
use clap::ArgMatches;
use console::style;
use std::path::PathBuf;
use std::time::Duration;

/// Resolves the collection directory: the flag wins, then the configured
/// default.
fn resolve_collection_dir(config: &Config, matches: &ArgMatches) -> Result<PathBuf> {
    if let Some(dir) = matches.get_one::<String>("collection") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.general.default_collection_dir {
        return Ok(dir.clone());
    }
    bail!(
        "No collection directory given. Pass --collection DIR or set \
         general.default_collection_dir in the config file."
    );
}

fn open_collection(config: &Config, matches: &ArgMatches) -> Result<Collection> {
    let dir = resolve_collection_dir(config, matches)?;
    let collection =
        Collection::load(&dir).with_context(|| format!("Failed to open collection at {}", dir.display()))?;
    if collection.skipped() > 0 {
        eprintln!(
            "Warning: {} record file(s) could not be read and were skipped",
            collection.skipped()
        );
    }
    Ok(collection)
}

fn catalog_source(config: &Config) -> OpenLibrarySource {
    OpenLibrarySource::with_options(
        config.lookup.base_url.clone(),
        Duration::from_secs(config.lookup.timeout_secs),
    )
}

/// List the books in the collection
pub fn list_books(config: &Config, matches: &ArgMatches) -> Result<()> {
    let mut collection = open_collection(config, matches)?;

    if collection.is_empty() {
        println!("No books in the collection. Use 'add' to add one.");
        return Ok(());
    }

    let order: SortOrder = matches
        .get_one::<String>("sort")
        .map(String::as_str)
        .unwrap_or("title")
        .parse()
        .context("Unknown sort order")?;
    order.apply(&mut collection);

    println!(
        "\n{} book(s) in {} — sorted by {}",
        style(collection.len()).bold().cyan(),
        collection.path().display(),
        order.label()
    );
    println!("{}", "=".repeat(80));

    for book in collection.books() {
        print_book_summary(book);
    }

    Ok(())
}

/// Add a book, optionally pre-filling missing fields from the catalog
pub fn add_book(config: &Config, matches: &ArgMatches) -> Result<()> {
    let mut collection = open_collection(config, matches)?;

    let mut title = matches.get_one::<String>("title").cloned();
    let mut author = matches.get_one::<String>("author").cloned();
    let mut year = matches.get_one::<String>("year").cloned();
    let mut pages = matches.get_one::<String>("pages").cloned();

    if let Some(isbn) = matches.get_one::<String>("isbn") {
        match catalog_source(config).lookup(isbn) {
            Ok(draft) => {
                fill_missing(&mut title, &draft.title);
                fill_missing(&mut author, &draft.author);
                fill_missing(&mut year, &draft.year);
                fill_missing(&mut pages, &draft.pages);
            }
            Err(e) => {
                // Lookup failures never block manual entry
                eprintln!("Warning: lookup failed: {}", e);
            }
        }
    }

    let missing: Vec<&str> = [
        ("title", &title),
        ("author", &author),
        ("year", &year),
        ("pages", &pages),
    ]
    .iter()
    .filter(|(_, v)| v.is_none())
    .map(|(name, _)| *name)
    .collect();

    if !missing.is_empty() {
        bail!(
            "Missing field(s): {}. Pass them as flags or via --isbn.",
            missing.join(", ")
        );
    }

    let id = collection.add_book(
        title.as_deref().unwrap_or_default(),
        author.as_deref().unwrap_or_default(),
        year.as_deref().unwrap_or_default(),
        pages.as_deref().unwrap_or_default(),
    )?;

    let book = collection
        .find(id)
        .context("Added book missing from collection")?;
    println!("{} Book added!", style("✓").green().bold());
    println!("  Title: {}", book.title);
    println!("  Author: {}", book.author);
    println!("  Year: {} | Pages: {}", book.year_published, book.page_count);
    println!("  ID: {}", book.date_added);

    Ok(())
}

/// Delete a book by its date-added identifier
pub fn delete_book(config: &Config, matches: &ArgMatches) -> Result<()> {
    let id_str = matches
        .get_one::<String>("id")
        .context("Book ID is required")?;
    let id = BookId::from_string(id_str).context("Invalid book ID format")?;

    let force = matches.get_flag("force");
    let mut collection = open_collection(config, matches)?;

    let title = collection
        .find(id)
        .map(|b| b.title.clone())
        .unwrap_or_else(|| id.to_string());

    if !force {
        println!("Are you sure you want to delete '{}'? (y/N)", title);
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let book = collection.delete_book(id)?;
    println!("{} Book deleted: {}", style("✓").green().bold(), book.title);

    Ok(())
}

/// Look up an ISBN and print the draft without touching the collection
pub fn lookup_isbn(config: &Config, matches: &ArgMatches) -> Result<()> {
    let isbn = matches
        .get_one::<String>("isbn")
        .context("ISBN is required")?;

    let draft = catalog_source(config)
        .lookup(isbn)
        .context("Lookup failed")?;

    if draft.is_empty() {
        println!("The catalog has no information for {}", isbn);
        return Ok(());
    }

    println!("\n{}", style("Catalog result").bold().cyan());
    println!("{}", "=".repeat(40));
    print_draft_field("Title", &draft.title);
    print_draft_field("Author", &draft.author);
    print_draft_field("Year", &draft.year);
    print_draft_field("Pages", &draft.pages);

    Ok(())
}

/// Export the collection as pretty-printed JSON
pub fn export_collection(config: &Config, matches: &ArgMatches) -> Result<()> {
    let collection = open_collection(config, matches)?;

    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("collection_export.json");

    let json =
        serde_json::to_string_pretty(collection.books()).context("Failed to serialize to JSON")?;
    std::fs::write(output, json).context("Failed to write export file")?;

    println!(
        "{} Exported {} book(s) to {}",
        style("✓").green().bold(),
        collection.len(),
        output
    );

    Ok(())
}

/// Run the interactive interface (the default when no subcommand is given)
pub fn run_tui(config: &Config, matches: &ArgMatches) -> Result<()> {
    // A --collection flag pre-fills the open screen
    let mut config = config.clone();
    if let Some(dir) = matches.get_one::<String>("collection") {
        config.general.default_collection_dir = Some(PathBuf::from(dir));
    }

    let mut app = bookshelf_tui::TuiApp::new(&config).context("Failed to initialize terminal")?;
    app.run().context("Interface error")?;
    Ok(())
}

fn fill_missing(slot: &mut Option<String>, from_draft: &str) {
    if slot.is_none() && !from_draft.is_empty() {
        *slot = Some(from_draft.to_string());
    }
}

fn print_draft_field(label: &str, value: &str) {
    if value.is_empty() {
        println!("{}: {}", label, style("(not in catalog)").dim());
    } else {
        println!("{}: {}", label, style(value).bold());
    }
}

fn print_book_summary(book: &Book) {
    println!("\n{}", style(&book.title).bold());
    println!("  by {}", book.author);
    println!(
        "  Year: {} | Pages: {} | Added: {} | ID: {}",
        book.year_published,
        book.page_count,
        format_date_added(book.date_added),
        book.date_added
    );
}

fn format_date_added(id: BookId) -> String {
    let micros = id.as_micros();
    DateTime::from_timestamp(
        (micros / 1_000_000) as i64,
        ((micros % 1_000_000) * 1_000) as u32,
    )
    .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d").to_string())
    .unwrap_or_else(|| id.to_string())
}
