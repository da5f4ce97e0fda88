//! Command-line HAL renderer.
//!
//! Reads a JSON payload from a file and writes the rendered document to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Render an object as a resource with a self link
//! cargo run --bin render -- resource widget.json --route '/widgets/{id}'
//!
//! # Render an array as page 2 of a collection, linking every item
//! cargo run --bin render -- collection widgets.json \
//!     --route /widgets --item-route '/widgets/{id}' --page 2 --page-size 10
//!
//! # Render a problem document
//! cargo run --bin render -- problem --status 404 --detail "Widget 7 not found"
//! ```
//!
//! Exits with status 1 when the output is a problem document.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use hal_renderer::domain::{
    ApiProblem, CollectionItem, HalCollection, HalResource, Link, LinkBuilder, Paginator,
};
use hal_renderer::render::{DocumentRenderer, JsonSerializer, LinkRenderer, RenderModel};
use hal_renderer::routing::{RouteOptions, RouteParams, RouteTable, StaticHostUrl};
use serde_json::Value;

const COLLECTION_ROUTE: &str = "collection";
const ITEM_ROUTE: &str = "item";

/// Render JSON payloads as HAL documents.
#[derive(Parser)]
#[command(name = "render")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Pretty-print the document
    #[arg(long, global = true)]
    pretty: bool,

    /// Origin used for canonical links
    #[arg(long, global = true, default_value = "http://localhost")]
    server_url: String,

    /// Include traces in problem documents
    #[arg(long, global = true)]
    display_exceptions: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON object as a resource
    Resource {
        /// File holding a JSON object
        file: PathBuf,

        /// Field holding the resource identifier
        #[arg(long, default_value = "id")]
        identifier: String,

        /// Route template for the self link, e.g. `/widgets/{id}`
        #[arg(long, conflicts_with = "self_url")]
        route: Option<String>,

        /// Literal self link
        #[arg(long)]
        self_url: Option<String>,

        /// Make the self link absolute
        #[arg(long)]
        canonical: bool,
    },

    /// Render a JSON array as a collection
    Collection {
        /// File holding a JSON array
        file: PathBuf,

        /// Relation the items are embedded under
        #[arg(long, default_value = "items")]
        name: String,

        /// Route template of the collection itself
        #[arg(long)]
        route: Option<String>,

        /// Route template used for item self links, e.g. `/widgets/{id}`
        #[arg(long)]
        item_route: Option<String>,

        /// Field holding item identifiers
        #[arg(long, default_value = "id")]
        identifier: String,

        /// Paginate and render this page
        #[arg(long)]
        page: Option<usize>,

        /// Items per page (0 puts everything on one page)
        #[arg(long, default_value_t = 30)]
        page_size: usize,

        /// Make collection links absolute
        #[arg(long)]
        canonical: bool,
    },

    /// Render a problem document
    Problem {
        /// HTTP status
        #[arg(long, default_value_t = 500)]
        status: u16,

        /// Human-readable explanation
        #[arg(long)]
        detail: String,

        /// Short summary (defaults to the status reason phrase)
        #[arg(long)]
        title: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut routes = RouteTable::new();
    let model = match cli.command {
        Commands::Resource {
            file,
            identifier,
            route,
            self_url,
            canonical,
        } => {
            let mut resource = HalResource::from_object(read_json(&file)?, &identifier)
                .context("Payload is not a resource")?;

            if let Some(url) = self_url {
                resource.add_link(Link::from_url("self", url)?);
            } else if let Some(template) = route {
                routes.add(ITEM_ROUTE, &template)?;
                let mut params = RouteParams::new();
                params.insert(identifier, resource.identifier().to_value());
                resource.add_link(
                    LinkBuilder::new("self")?
                        .route(ITEM_ROUTE, params, route_options(canonical))?
                        .build()?,
                );
            }

            RenderModel::Resource(resource)
        }
        Commands::Collection {
            file,
            name,
            route,
            item_route,
            identifier,
            page,
            page_size,
            canonical,
        } => {
            let Value::Array(values) = read_json(&file)? else {
                anyhow::bail!("{} does not hold a JSON array", file.display());
            };
            let items: Vec<CollectionItem> = values.into_iter().map(Into::into).collect();

            let mut collection = match page {
                Some(page) => HalCollection::paginated(Paginator::from_items(items))
                    .page(page)
                    .page_size(page_size),
                None => HalCollection::from_list(items),
            }
            .collection_name(name)
            .identifier_name(identifier);

            if let Some(template) = route {
                routes.add(COLLECTION_ROUTE, &template)?;
                collection = collection.collection_route(
                    COLLECTION_ROUTE,
                    RouteParams::new(),
                    route_options(canonical),
                );
            }
            if let Some(template) = item_route {
                routes.add(ITEM_ROUTE, &template)?;
                collection = collection.resource_route(ITEM_ROUTE);
            }

            RenderModel::Collection(collection)
        }
        Commands::Problem {
            status,
            detail,
            title,
        } => {
            let problem = ApiProblem::new(status, detail);
            RenderModel::Problem(match title {
                Some(title) => problem.with_title(title),
                None => problem,
            })
        }
    };

    let host = StaticHostUrl::new(&cli.output.server_url)?;
    let renderer = DocumentRenderer::new(LinkRenderer::new(Arc::new(routes), Arc::new(host)))
        .with_serializer(JsonSerializer {
            pretty: cli.output.pretty,
            ..JsonSerializer::default()
        })
        .display_exceptions(cli.output.display_exceptions);

    let document = renderer.render_or_problem(&model);
    println!("{}", document.body());

    match document.api_problem() {
        Some(problem) => {
            eprintln!(
                "{} {} {}",
                "error:".red().bold(),
                problem.status().to_string().red(),
                problem.detail()
            );
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn route_options(canonical: bool) -> RouteOptions {
    if canonical {
        RouteOptions::canonical()
    } else {
        RouteOptions::default()
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}
