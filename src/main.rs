//! nodedocs: MCP server for Node.js core API documentation.
//!
//! Usage:
//!   nodedocs --mcp                  # Start MCP server on stdin/stdout
//!   nodedocs list                   # List modules and methods
//!   nodedocs doc fs --method read   # Print module docs as markdown

use clap::{Parser, Subcommand};
use nodedocs::render::DocFilter;
use nodedocs::server::NodeDocsServer;
use nodedocs::services::{DocsProvider, DEFAULT_DOCS_URL};
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nodedocs")]
#[command(about = "MCP server exposing Node.js core API documentation as per-module tools")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC)
    #[arg(long)]
    mcp: bool,

    /// Documentation endpoint (JSON tree under a `modules` key)
    #[arg(long, default_value = DEFAULT_DOCS_URL)]
    docs_url: String,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every documented module and its methods
    List {
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Print one module's documentation as markdown
    Doc {
        /// Module name (case, underscores, hyphens, whitespace ignored)
        module: String,

        /// Only classes whose title or description contains this substring
        #[arg(long)]
        class: Option<String>,

        /// Only methods whose title or description contains this substring
        #[arg(long)]
        method: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // CRITICAL: Log to stderr only (stdout is JSON-RPC for MCP)
    let directive = if cli.debug {
        "nodedocs=debug"
    } else {
        "nodedocs=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let provider = DocsProvider::over_http(cli.docs_url);

    if cli.mcp {
        run_mcp_server(provider).await
    } else if let Some(cmd) = cli.command {
        run_cli(provider, cmd).await
    } else {
        eprintln!("Use --mcp to start the MCP server, or a subcommand for CLI mode.");
        eprintln!("Run with --help for more information.");
        std::process::exit(1);
    }
}

async fn run_mcp_server(provider: DocsProvider) -> anyhow::Result<()> {
    tracing::info!("Starting MCP server");

    let server = NodeDocsServer::new(provider);

    // Run the MCP server on stdin/stdout
    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

async fn run_cli(provider: DocsProvider, cmd: Commands) -> anyhow::Result<()> {
    let tree = provider.tree().await?;

    match cmd {
        Commands::List { no_color } => {
            let mut stdout = std::io::stdout().lock();
            nodedocs::fmt::fmt_catalog(&mut stdout, &tree.modules, !no_color)?;
        }

        Commands::Doc {
            module,
            class,
            method,
        } => {
            let Some(node) = nodedocs::tools::find_module(&tree.modules, &module) else {
                anyhow::bail!("No module matches '{module}'. Try `nodedocs list`.");
            };
            let filter = DocFilter { class, method };
            let text = nodedocs::render::render_module(node, &filter)?;
            println!("{text}");
        }
    }

    Ok(())
}
