use clap::Parser;
use small_cart::utils::error::ErrorSeverity;
use small_cart::utils::logger;
use small_cart::{CliConfig, ConsoleRenderer, ProductId, RenderContext, Shop, ShopError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const HELP: &str = "\
Commands:
  list                 show the catalog
  add <id>             add a product to the cart
  remove <id>          remove a product from the cart
  new <name> <price>   add a product to the catalog
  total                show the cart total
  cart                 show the cart
  clear                empty the cart
  reload               reload products from the source
  help                 show this message
  quit                 exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Add(ProductId),
    Remove(ProductId),
    New { name: String, price: String },
    Total,
    Cart,
    Clear,
    Reload,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = parts.collect();

    let parse_id = |args: &[&str]| -> Result<ProductId, String> {
        match args {
            [id] => id
                .parse::<u32>()
                .map(ProductId)
                .map_err(|_| format!("'{}' is not a product id", id)),
            _ => Err("expected exactly one product id".to_string()),
        }
    };

    match word {
        "list" | "ls" => Ok(Command::List),
        "add" => parse_id(&rest).map(Command::Add),
        "remove" | "rm" => parse_id(&rest).map(Command::Remove),
        "new" => match rest.split_last() {
            Some((price, name)) if !name.is_empty() => Ok(Command::New {
                name: name.join(" "),
                price: price.to_string(),
            }),
            _ => Err("Provide name and price.".to_string()),
        },
        "total" => Ok(Command::Total),
        "cart" => Ok(Command::Cart),
        "clear" => Ok(Command::Clear),
        "reload" => Ok(Command::Reload),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Logs the outcome of a background action once it finishes.
fn watch<T: Send + 'static>(action: &'static str, task: JoinHandle<small_cart::Result<T>>) {
    tokio::spawn(async move {
        match task.await {
            Ok(Ok(_)) => tracing::debug!("{} finished", action),
            Ok(Err(e)) => tracing::warn!("{} failed: {}", action, e),
            Err(e) => tracing::error!("{} task panicked: {}", action, e),
        }
    });
}

fn exit_code(e: &ShopError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ShopError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting small-cart");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve().unwrap_or_else(|e| fail(e));
    let source = config.build_source().unwrap_or_else(|e| fail(e));

    let (render, render_task) = RenderContext::start(ConsoleRenderer::stdout());
    let shop = Shop::new(source, render);

    watch("initial load", shop.reload_products());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("! {}", message);
                continue;
            }
        };

        let outcome = match command {
            Command::List => {
                let items = shop.catalog().list();
                print!("{}", small_cart::adapters::console::format_catalog(&items));
                Ok(())
            }
            Command::Add(id) => {
                watch("add to cart", shop.add_to_cart(id));
                Ok(())
            }
            Command::Remove(id) => shop.remove_from_cart(id).map(|_| ()),
            Command::New { name, price } => shop.add_product(&name, &price).map(|_| ()),
            Command::Total => shop.show_total().map(|_| ()),
            Command::Cart => {
                let (snapshot, total) = shop.cart().snapshot_with_total();
                print!("{}", small_cart::adapters::console::format_cart(&snapshot, total));
                Ok(())
            }
            Command::Clear => shop.clear_cart().map(|_| ()),
            Command::Reload => {
                watch("reload", shop.reload_products());
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = outcome {
            // Input errors were already shown by the renderer.
            if e.severity() > ErrorSeverity::Low {
                tracing::error!("{}", e);
                eprintln!("❌ {}", e.user_friendly_message());
            }
        }
    }

    tracing::info!("Shutting down");
    drop(shop);
    // Background tasks still holding a render handle are abandoned with the runtime.
    tokio::time::timeout(std::time::Duration::from_secs(1), render_task)
        .await
        .ok();
    Ok(())
}
