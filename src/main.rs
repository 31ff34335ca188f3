//! `menuhub` command-line shell.
//!
//! A thin runtime around the library's page handlers: it feeds user input to a page
//! as events, executes the returned actions against the backend and feeds the
//! results back until the page settles.

use clap::{Parser, Subcommand};
use menuhub::api::{ReqwestTransport, RestaurantApi, StaticTokenProvider};
use menuhub::app::{
    handle_manage_event, handle_search_event, Action, ManageEvent, ManageRestaurantPage,
    Notification, NotificationLevel, Notifier, SearchEvent, SearchPage, TracingNotifier,
};
use menuhub::form::{FieldValue, ImageFile, RestaurantForm, TransferPayload};
use menuhub::observability::init_tracing;
use menuhub::query::{QueryStatus, SearchRequest};
use menuhub::search::SortOption;
use menuhub::{initialize, Config, MenuhubError, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Instrument;

type Api = RestaurantApi<StaticTokenProvider, ReqwestTransport>;

#[derive(Parser, Debug)]
#[command(name = "menuhub", version, about = "Restaurant search and management client")]
struct Cli {
    #[arg(long, global = true, env = "MENUHUB_CONFIG", help = "Path to a TOML configuration file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search restaurants in a city.
    Search {
        city: String,
        #[arg(long)]
        query: Option<String>,
        #[arg(long = "cuisine", help = "Cuisine filter; repeat for several")]
        cuisines: Vec<String>,
        #[arg(long, help = "bestMatch, deliveryPrice, estimatedDeliveryTime or a custom option")]
        sort: Option<SortOption>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, default_value_t = false, help = "Print the request instead of sending it")]
        dry_run: bool,
    },
    /// Manage your own restaurant.
    Restaurant {
        #[command(subcommand)]
        command: RestaurantCommands,
    },
}

#[derive(Subcommand, Debug)]
enum RestaurantCommands {
    /// Print your restaurant as an editable form.
    Show,
    /// Create or update your restaurant from a TOML form file.
    Submit {
        form: PathBuf,
        #[arg(long, help = "Image to upload instead of the form's imageUrl")]
        image: Option<PathBuf>,
        #[arg(long, default_value_t = false, help = "Validate and print the payload without sending it")]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("menuhub: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = init_tracing(&config);

    let span = tracing::info_span!("menuhub_command", command = ?cli.command);
    match run(cli, &config).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("menuhub: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &Config) -> Result<()> {
    // JSON output owns stdout; notifications then go to the log.
    let notifier: Box<dyn Notifier> = if cli.json {
        Box::new(TracingNotifier)
    } else {
        Box::new(ConsoleNotifier)
    };
    let shell = Shell {
        api: initialize(config)?,
        notifier,
        json: cli.json,
    };

    match cli.command {
        Commands::Search { city, query, cuisines, sort, page, dry_run } => {
            let mut events = vec![SearchEvent::Mounted];
            if let Some(query) = query {
                events.push(SearchEvent::QuerySubmitted(query));
            }
            if !cuisines.is_empty() {
                events.push(SearchEvent::CuisinesChanged(cuisines));
            }
            if let Some(sort) = sort {
                events.push(SearchEvent::SortChanged(sort));
            }
            // Filters reset the page, so the page number goes last.
            if let Some(page) = page {
                events.push(SearchEvent::PageChanged(page));
            }
            shell.search(SearchPage::new(Some(city)), &events, dry_run).await
        }
        Commands::Restaurant { command: RestaurantCommands::Show } => shell.show().await,
        Commands::Restaurant { command: RestaurantCommands::Submit { form, image, dry_run } } => {
            let mut form = read_form(&form)?;
            if let Some(image) = image {
                form.set_image_file(read_image(&image)?);
            }
            shell.submit(form, dry_run).await
        }
    }
}

struct Shell {
    api: Api,
    notifier: Box<dyn Notifier>,
    json: bool,
}

impl Shell {
    async fn search(&self, mut page: SearchPage, events: &[SearchEvent], dry_run: bool) -> Result<()> {
        // Every input event may plan a fetch; only the last one is still current.
        let mut latest: Option<SearchRequest> = None;
        for event in events {
            let (_, actions) = handle_search_event(&mut page, event)?;
            for action in actions {
                match action {
                    Action::FetchSearch(request) => latest = Some(request),
                    other => self.perform(other),
                }
            }
        }

        let Some(request) = latest else {
            return Err(MenuhubError::Config("a city is required to search".to_string()));
        };

        if dry_run {
            println!("GET {}", self.api.search_url(&request)?);
            return Ok(());
        }

        let outcome = self.api.search_restaurants(&request).await;
        handle_search_event(&mut page, &SearchEvent::SearchCompleted { request, outcome })?;

        match page.status() {
            QueryStatus::Ready(response) if self.json => print_json(response),
            QueryStatus::Ready(response) if response.is_empty() => {
                println!("No restaurants found in {}", page.locality().unwrap_or_default());
                Ok(())
            }
            QueryStatus::Ready(response) => {
                for restaurant in &response.data {
                    println!(
                        "{:<32} {:<16} delivery {:>7.2}  {:>3} min  {}",
                        restaurant.restaurant_name,
                        restaurant.city,
                        restaurant.delivery_price.to_major(),
                        restaurant.estimated_delivery_time,
                        restaurant.cuisines.join(", ")
                    );
                }
                let pagination = response.pagination;
                println!("page {}/{} ({} total)", pagination.page, pagination.pages, pagination.total);
                Ok(())
            }
            QueryStatus::Failed(error) => Err(error.clone()),
            QueryStatus::NotExecuted | QueryStatus::Pending => Ok(()),
        }
    }

    async fn show(&self) -> Result<()> {
        let mut page = ManageRestaurantPage::new();
        self.drive(&mut page, ManageEvent::Mounted, false).await?;
        if let Some(error) = page.last_error() {
            return Err(error.clone());
        }

        if self.json {
            return print_json(page.form());
        }
        let text = toml::to_string_pretty(page.form())
            .map_err(|e| MenuhubError::Decode(e.to_string()))?;
        print!("{text}");
        Ok(())
    }

    async fn submit(&self, form: RestaurantForm, dry_run: bool) -> Result<()> {
        let mut page = ManageRestaurantPage::new();
        self.drive(&mut page, ManageEvent::Mounted, dry_run).await?;
        if let Some(error) = page.last_error() {
            return Err(error.clone());
        }

        self.drive(&mut page, ManageEvent::FormEdited(form), dry_run).await?;
        self.drive(&mut page, ManageEvent::Submit, dry_run).await?;
        page.last_error().map_or(Ok(()), |error| Err(error.clone()))
    }

    /// Runs `event` and every event its actions produce until the page settles.
    async fn drive(&self, page: &mut ManageRestaurantPage, event: ManageEvent, dry_run: bool) -> Result<()> {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_manage_event(page, &event)?;
            for action in actions {
                if let Some(next) = self.execute(action, dry_run).await {
                    queue.push_back(next);
                }
            }
        }
        Ok(())
    }

    async fn execute(&self, action: Action, dry_run: bool) -> Option<ManageEvent> {
        match action {
            Action::LoadMyRestaurant => {
                Some(ManageEvent::RestaurantLoaded(self.api.get_my_restaurant().await))
            }
            Action::SubmitRestaurant { mode, payload } if dry_run => {
                println!("{} {}", mode.method(), describe(&payload));
                None
            }
            Action::SubmitRestaurant { mode, payload } => {
                Some(ManageEvent::SubmitCompleted(self.api.submit(mode, payload).await))
            }
            other => {
                self.perform(other);
                None
            }
        }
    }

    /// Executes actions that need no response.
    fn perform(&self, action: Action) {
        match action {
            Action::Notify(notification) => self.notifier.notify(&notification),
            Action::CancelSearch => tracing::debug!("search cancelled"),
            other => tracing::debug!(action = ?other, "action not applicable here"),
        }
    }
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{notification}"),
            NotificationLevel::Warning | NotificationLevel::Error => eprintln!("{notification}"),
        }
    }
}

fn read_form(path: &Path) -> Result<RestaurantForm> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| MenuhubError::Decode(format!("{}: {e}", path.display())))
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    let content_type = match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(ImageFile::new(file_name, content_type, bytes))
}

/// One line per field, files summarised.
fn describe(payload: &TransferPayload) -> String {
    let fields: Vec<String> = payload
        .iter()
        .map(|(name, value)| match value {
            FieldValue::Text(text) => format!("  {name} = {text}"),
            FieldValue::File(file) => format!("  {name} = <{} {} bytes>", file.content_type, file.bytes.len()),
        })
        .collect();
    format!("multipart ({} fields)\n{}", payload.len(), fields.join("\n"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| MenuhubError::Decode(e.to_string()))?;
    println!("{text}");
    Ok(())
}
