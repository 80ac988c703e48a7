//! Command-line surface of the console.
//!
//! One subcommand per document type, each exposing the generic CRUD
//! actions; `need` adds the workflow decisions on top.

// Rendered documents are the command's output; diagnostics stay on
// stderr via tracing.
#![allow(clippy::print_stdout)]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use serde_json::{Map, Value};
use tracing::warn;

use crate::api::ApiClient;
use crate::auth::StaticTokenProvider;
use crate::document::{decode_data, DocumentType, NeedData};
use crate::resource::{config_for, ResourceEngine, DEFAULT_PAGE_LIMIT};
use crate::user_config::{load_user_config, UserConfig};
use crate::view::{
    render_list, GenericForm, NeedForm, Pagination, PostForm, ResourceView, ViewMode,
};
use crate::workflow::{self, WorkflowAction};

/// Knowledge-base console - administer documents over the REST API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the knowledge-base API
    #[arg(long, env = "KB_CONSOLE_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token for authenticated requests
    #[arg(long, env = "KB_CONSOLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "KB_CONSOLE_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "KB_CONSOLE_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,

    /// Custom log directory (default: ~/.kb-console/logs)
    #[arg(long, env = "KB_CONSOLE_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage posts
    Post {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manage prompts
    Prompt {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manage models
    Model {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manage needs and their validation workflow
    Need {
        #[command(subcommand)]
        action: NeedAction,
    },
    /// Manage applications
    Application {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

/// Generic CRUD actions available on every document type.
#[derive(Subcommand, Debug)]
pub enum ResourceAction {
    /// List documents, newest first
    List {
        /// Page size
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: usize,
        /// Number of documents to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Client-side quick filter id (e.g. a workflow stage for needs)
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one document
    Show { id: String },
    /// Create a document from a JSON object
    Create {
        /// Document body as JSON (e.g. '{"title":"...","data":{...}}')
        data: String,
    },
    /// Update a document from a JSON object
    Update {
        id: String,
        /// Partial document body as JSON
        data: String,
    },
    /// Delete a document
    Delete {
        id: String,
        /// Skip the confirmation step
        #[arg(long)]
        yes: bool,
    },
}

/// Need actions: the generic CRUD set plus the workflow decisions.
#[derive(Subcommand, Debug)]
pub enum NeedAction {
    #[command(flatten)]
    Resource(ResourceAction),
    /// Accept the need's current stage, advancing it
    Accept { id: String },
    /// Reject the need back to analyse with a response
    Reject {
        id: String,
        /// Explanation sent back to the requester (required)
        #[arg(long)]
        response: String,
    },
}

/// Execute the parsed command against the configured API.
///
/// # Errors
///
/// Configuration, connection and operation failures, ready for
/// color-eyre display.
pub async fn run(args: Args) -> Result<()> {
    let user_cfg = load_user_config().unwrap_or_else(|e| {
        warn!("Failed to load user config, using defaults: {e}");
        UserConfig::default()
    });

    let base_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| user_cfg.api.base_url.clone());
    let token = args.token.clone().or_else(|| user_cfg.api.token.clone());
    let provider = match token {
        Some(token) => StaticTokenProvider::new(token),
        None => StaticTokenProvider::anonymous(),
    };
    let client = Arc::new(ApiClient::new(&base_url, Arc::new(provider))?);

    let result = match args.command {
        Command::Post { action } => {
            resource_command(&client, DocumentType::Post, action).await
        }
        Command::Prompt { action } => {
            resource_command(&client, DocumentType::Prompt, action).await
        }
        Command::Model { action } => {
            resource_command(&client, DocumentType::Model, action).await
        }
        Command::Application { action } => {
            resource_command(&client, DocumentType::Application, action).await
        }
        Command::Need { action } => need_command(&client, action).await,
    };
    if result.is_err() {
        let log_file = crate::logging::get_log_file_path();
        if !log_file.is_empty() {
            eprintln!("Logs: {log_file}");
        }
    }
    result
}

fn engine_for(client: &Arc<ApiClient>, doc_type: DocumentType) -> ResourceEngine {
    ResourceEngine::new(Arc::clone(client), config_for(doc_type))
}

fn form_for(doc_type: DocumentType) -> Box<dyn crate::view::FormRenderer> {
    match doc_type {
        DocumentType::Post => Box::new(PostForm),
        DocumentType::Besoin => Box::new(NeedForm),
        DocumentType::Prompt | DocumentType::Model | DocumentType::Application => {
            Box::new(GenericForm)
        }
    }
}

fn parse_body(data: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(data)? {
        Value::Object(map) => Ok(map),
        other => Err(eyre!("expected a JSON object body, got: {other}")),
    }
}

async fn resource_command(
    client: &Arc<ApiClient>,
    doc_type: DocumentType,
    action: ResourceAction,
) -> Result<()> {
    let engine = engine_for(client, doc_type);
    match action {
        ResourceAction::List {
            limit,
            skip,
            filter,
        } => {
            engine.fetch_all(limit, skip).await?;
            let state = engine.state();
            let mut pagination = Pagination::new(limit);
            pagination.skip = skip;
            pagination.total = state.total;
            println!(
                "{}",
                render_list(
                    engine.config(),
                    &state.items,
                    filter.as_deref(),
                    Some(&pagination)
                )
            );
        }
        ResourceAction::Show { id } => {
            engine.fetch_one(&id).await?;
            if let Some(doc) = engine.state().current_item {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
        }
        ResourceAction::Create { data } => {
            let mut view = ResourceView::new(engine.config(), ViewMode::Create, form_for(doc_type));
            view.change(&parse_body(&data)?);
            if let Some(doc) = view.submit(&engine).await? {
                println!("Created {} {}", engine.config().labels.singular, doc.id);
            }
        }
        ResourceAction::Update { id, data } => {
            engine.fetch_one(&id).await?;
            let current = engine
                .state()
                .current_item
                .ok_or_else(|| eyre!("document {id} not found"))?;
            let mut view = ResourceView::new(engine.config(), ViewMode::Edit, form_for(doc_type));
            view.sync_initial(&current);
            view.change(&parse_body(&data)?);
            if let Some(doc) = view.submit(&engine).await? {
                println!("Updated {} {}", engine.config().labels.singular, doc.id);
            }
        }
        ResourceAction::Delete { id, yes } => {
            if !yes {
                println!("Re-run with --yes to confirm deleting {id}.");
                return Ok(());
            }
            engine.fetch_one(&id).await?;
            let current = engine
                .state()
                .current_item
                .ok_or_else(|| eyre!("document {id} not found"))?;
            let mut view = ResourceView::new(engine.config(), ViewMode::Edit, form_for(doc_type));
            view.sync_initial(&current);
            view.request_delete();
            if view.confirm_delete(&engine).await? {
                println!("Deleted {id}");
            }
        }
    }
    Ok(())
}

async fn need_command(client: &Arc<ApiClient>, action: NeedAction) -> Result<()> {
    match action {
        NeedAction::Resource(ResourceAction::Show { id }) => show_need(client, &id).await,
        NeedAction::Resource(crud) => {
            resource_command(client, DocumentType::Besoin, crud).await
        }
        NeedAction::Accept { id } => {
            decide(client, &id, WorkflowAction::Accept).await
        }
        NeedAction::Reject { id, response } => {
            decide(client, &id, WorkflowAction::Reject { response }).await
        }
    }
}

/// Show a need along with the workflow decisions currently open on it.
async fn show_need(client: &Arc<ApiClient>, id: &str) -> Result<()> {
    let engine = engine_for(client, DocumentType::Besoin);
    engine.fetch_one(id).await?;
    let need = engine
        .state()
        .current_item
        .ok_or_else(|| eyre!("need {id} not found"))?;
    println!("{}", serde_json::to_string_pretty(&need)?);
    if let Ok(data) = decode_data::<NeedData>(&need) {
        println!("{}", actions_line(&data));
    }
    Ok(())
}

fn actions_line(data: &NeedData) -> String {
    let actions = workflow::available_actions(data);
    if actions.is_empty() {
        "Available actions: none (already validated)".to_owned()
    } else {
        format!("Available actions: {}", actions.join(", "))
    }
}

async fn decide(client: &Arc<ApiClient>, id: &str, action: WorkflowAction) -> Result<()> {
    let engine = engine_for(client, DocumentType::Besoin);
    engine.fetch_one(id).await?;
    let need = engine
        .state()
        .current_item
        .ok_or_else(|| eyre!("need {id} not found"))?;
    match workflow::apply(&engine, &need, action).await? {
        Some(updated) => println!("Need {} is now at {}", updated.id, stage_of(&updated)),
        None => println!("Need {id} is already validated; nothing to do."),
    }
    Ok(())
}

fn stage_of(doc: &crate::document::Document) -> String {
    doc.data
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}
