//! storefront-search: interactive driver for the search engine
//!
//! Reads lines from stdin. Plain text is typed into the search box; lines
//! starting with `:` are commands (see `:help`).

use anyhow::Result;
use std::sync::Arc;
use storefront_search::{
    config::{self, Settings},
    history::FileStore,
    network::HttpClient,
    scope::InMemoryStoreDirectory,
    search::{ApplyStatus, Navigator, SearchController, SearchView},
    suggest::HttpCatalog,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Prints where the router would take the shopper
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, path: &str) {
        println!("-> navigate to {}", path);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::load()?;

    let default_level = if settings.general.debug { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting storefront-search v{}", storefront_search::VERSION);

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let catalog = Arc::new(HttpCatalog::new(client, settings.api.clone()));
    let directory = Arc::new(InMemoryStoreDirectory::new(settings.stores.clone()));
    let storage = Arc::new(FileStore::new(settings.history_dir()));
    info!("Recent searches stored in {}", storage.dir().display());

    let mut controller = SearchController::new(
        &settings,
        catalog,
        directory.clone(),
        storage,
        Arc::new(PrintNavigator),
    );

    print_usage(&settings);
    show_idle(&controller).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        let (command, arg) = match line.strip_prefix(':') {
            Some(rest) => {
                let mut parts = rest.splitn(2, ' ');
                (parts.next().unwrap_or(""), parts.next().unwrap_or("").trim())
            }
            None => {
                let status = controller.input(line).await;
                render(&controller, &settings, status);
                if controller.query().is_blank() {
                    show_idle(&controller).await;
                }
                continue;
            }
        };

        match command {
            "more" => {
                let status = controller.load_more().await;
                render(&controller, &settings, status);
            }
            "submit" => {
                let text = if arg.is_empty() {
                    controller.query().text.clone()
                } else {
                    arg.to_string()
                };
                if let Err(e) = controller.submit(&text) {
                    println!("cannot submit: {}", e);
                }
            }
            "select" => {
                controller.select_suggestion(arg);
            }
            "store" => {
                let store_id = match arg {
                    "" | "-" => None,
                    id => Some(id.to_string()),
                };
                let ticket = controller.set_store_context(store_id);
                let status = controller.dispatch(ticket).await;
                render(&controller, &settings, status);
            }
            "stores" => {
                directory.set_stores(arg.split(',').map(str::trim).filter(|s| !s.is_empty()));
            }
            "idle" => show_idle(&controller).await,
            "history" => {
                for (i, entry) in controller.recent_searches().iter().enumerate() {
                    println!("{:>2}. {}", i + 1, entry);
                }
            }
            "forget" => match controller.remove_recent_search(arg) {
                Ok(true) => println!("removed '{}'", arg),
                Ok(false) => println!("'{}' is not in recent searches", arg),
                Err(e) => println!("failed to update recent searches: {}", e),
            },
            "clear-history" => {
                if let Err(e) = controller.clear_recent_searches() {
                    println!("failed to clear recent searches: {}", e);
                }
            }
            "close" => controller.close(),
            "help" => print_usage(&settings),
            "quit" | "q" => break,
            other => println!("unknown command ':{}' (try :help)", other),
        }
    }

    Ok(())
}

fn render(controller: &SearchController, settings: &Settings, status: Option<ApplyStatus>) {
    let view = controller.view();
    if view.is_no_results() {
        println!("No results");
    } else if let SearchView::Results { items, pagination } = view {
        for item in items {
            println!(
                "  [{}] {} ({}) {:.2}  {}",
                item.id,
                item.name,
                item.category,
                item.price,
                item.image_or(&settings.ui.placeholder_image)
            );
        }
        let more = if pagination.has_more { ", :more for next page" } else { "" };
        println!(
            "{} results, page {}{}",
            items.len(),
            pagination.current_page,
            more
        );
    }

    if status == Some(ApplyStatus::Stale) {
        println!("(dropped an outdated response)");
    }
}

async fn show_idle(controller: &SearchController) {
    let lists = controller.idle_lists().await;
    if !controller.recent_searches().is_empty() {
        println!("Recent: {}", controller.recent_searches().join(", "));
    }
    for (title, items) in [
        ("Popular", &lists.popular),
        ("Recommended", &lists.recommended),
        ("Featured", &lists.featured),
    ] {
        if items.is_empty() {
            continue;
        }
        let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
        println!("{}: {}", title, names.join(", "));
    }
}

/// Print usage information
fn print_usage(settings: &Settings) {
    println!(
        r#"
{} search (storefront-search v{})
Type to search. Commands:
    :more                 Load the next page
    :submit [TEXT]        Search for TEXT (or the current query)
    :select <ID>          Open a product
    :store <ID>|-         Search one store, or all stores
    :stores A,B,C         Replace the known store set
    :idle                 Show recent and recommended lists
    :history              Show recent searches
    :forget <TEXT>        Remove one recent search
    :clear-history        Forget all recent searches
    :close                Close the suggestion panel
    :quit                 Exit

ENVIRONMENT VARIABLES:
    STOREFRONT_SETTINGS_PATH  Path to settings.yml
    STOREFRONT_API_URL        Backend base URL
    STOREFRONT_STORE_ID       Start scoped to this store
    STOREFRONT_HISTORY_DIR    Where recent searches are kept
    STOREFRONT_PAGE_SIZE      Suggestions per page
    STOREFRONT_DEBUG          Enable debug logging (true/false)
"#,
        settings.general.storefront_name,
        storefront_search::VERSION
    );
}
