use anyhow::Context;
use clap::Parser;
use docsym::cli::{Cli, Commands};
use docsym::config::Config;
use docsym::context::SearchContext;
use docsym::load::load_path;
use docsym::server::SymbolServer;
use docsym::tools::OutputFormat;
use docsym::tools::buckets::{
    BucketEntriesRequest, ListBucketsRequest, handle_bucket_entries, handle_list_buckets,
};
use docsym::tools::search::{SearchRequest, handle_search};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docsym::tracing::init(cli.verbose);

    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(index) = cli.index {
        config.index = Some(index);
    }
    if let Some(width) = cli.partition_width {
        config.partition_width = width;
    }

    let index_path = config
        .index_path()
        .context("No search index configured. Pass --index or set `index` in docsym.toml")?;

    // Ctrl-C during startup abandons the load instead of leaving a half-built index
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let store = load_path(&index_path, config.load_options()?, &cancel)
        .await
        .with_context(|| format!("Search unavailable: cannot load {}", index_path.display()))?;
    let context = SearchContext::new(Arc::new(store), config.default_limit);

    let output_format = |json: bool| Some(if json { OutputFormat::Json } else { OutputFormat::Text });

    let output = match cli.command {
        Commands::Search {
            query,
            kind,
            limit,
            json,
        } => handle_search(
            &context,
            SearchRequest {
                query,
                kind,
                limit,
                format: output_format(json),
            },
        ),
        Commands::Buckets { json } => handle_list_buckets(
            &context,
            ListBucketsRequest {
                format: output_format(json),
            },
        ),
        Commands::List { bucket, json } => handle_bucket_entries(
            &context,
            BucketEntriesRequest {
                bucket,
                format: output_format(json),
            },
        ),
        Commands::Serve => {
            tracing::info!("Starting docsym MCP server");

            let service = SymbolServer::new(context)
                .serve(stdio())
                .await
                .inspect_err(|e| {
                    tracing::error!("Error serving MCP server: {:?}", e);
                })?;

            service.waiting().await?;
            return Ok(());
        }
    };

    match output {
        Ok(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        Err(message) => anyhow::bail!(message),
    }
}
