//! Dispute Assistant server binary.
//!
//! Loads configuration, picks the session store, dispute store, and AI
//! backend it names, then serves the HTTP and websocket API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dispute_assistant::adapters::http::{create_router, AppState, HealthState, RouterOptions};
use dispute_assistant::adapters::{
    InMemoryDisputeRepository, InMemorySessionStore, OllamaConfig, OllamaProvider, OpenAIConfig,
    OpenAIProvider, PostgresDisputeRepository, RedisSessionStore,
};
use dispute_assistant::application::{ChatHandler, FallbackResponder};
use dispute_assistant::config::{
    AiConfig, AiProviderKind, AppConfig, ConfigError, DatabaseConfig, ValidationError,
};
use dispute_assistant::domain::foundation::DomainError;
use dispute_assistant::ports::{
    AIError, AIProvider, DisputeRepository, SessionStore, SessionStoreError,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("session store: {0}")]
    SessionStore(#[from] SessionStoreError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("dispute store: {0}")]
    DisputeStore(#[from] DomainError),

    #[error("AI provider: {0}")]
    Ai(#[from] AIError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let sessions = build_session_store(&config).await?;
    let disputes = build_dispute_repository(config.database.as_ref()).await?;
    let responder = Arc::new(build_responder(&config.ai)?);

    let health = HealthState {
        version: env!("CARGO_PKG_VERSION"),
        environment: config.server.environment.as_str().to_string(),
        ai_provider: responder.provider_info(),
    };
    let chat_handler = Arc::new(ChatHandler::new(sessions, disputes.clone(), responder));
    let state = AppState::new(chat_handler, disputes, health);

    let options = RouterOptions {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: Some(config.server.request_timeout()),
    };
    let app = create_router(state, &options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = config.server.environment.as_str(),
        "dispute-assistant listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("dispute-assistant stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, StartupError> {
    match &config.redis {
        Some(redis) => {
            let connect = RedisSessionStore::connect(&redis.url, config.session.ttl());
            let store = tokio::time::timeout(redis.timeout(), connect)
                .await
                .map_err(|_| {
                    SessionStoreError::Unavailable(format!(
                        "connection timed out after {}s",
                        redis.timeout_secs
                    ))
                })??;
            tracing::info!("Using Redis session store");
            Ok(Arc::new(store))
        }
        None => {
            let store = InMemorySessionStore::new(config.session.ttl());
            store.spawn_sweeper(config.session.sweep_interval());
            tracing::info!(
                ttl_secs = config.session.ttl_secs,
                "Using in-memory session store"
            );
            Ok(Arc::new(store))
        }
    }
}

async fn build_dispute_repository(
    config: Option<&DatabaseConfig>,
) -> Result<Arc<dyn DisputeRepository>, StartupError> {
    let Some(database) = config else {
        tracing::warn!("No database configured, disputes are kept in memory");
        return Ok(Arc::new(InMemoryDisputeRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    let repository = PostgresDisputeRepository::new(pool);
    if database.run_migrations {
        repository.run_migrations(&database.migrations_dir).await?;
        tracing::info!(dir = %database.migrations_dir.display(), "Migrations applied");
    }
    tracing::info!("Using PostgreSQL dispute store");
    Ok(Arc::new(repository))
}

fn build_responder(config: &AiConfig) -> Result<FallbackResponder, StartupError> {
    let provider: Arc<dyn AIProvider> = match config.provider {
        AiProviderKind::None => {
            tracing::info!("No AI provider configured, using scripted fallback replies");
            return Ok(FallbackResponder::static_only());
        }
        AiProviderKind::OpenAI => {
            let key = config
                .openai_api_key
                .as_ref()
                .map(|k| secrecy::ExposeSecret::expose_secret(k).clone())
                .ok_or(ValidationError::MissingRequired("AI__OPENAI_API_KEY"))?;
            let mut openai = OpenAIConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                openai = openai.with_model(model.clone());
            }
            if let Some(url) = &config.openai_base_url {
                openai = openai.with_base_url(url.clone());
            }
            Arc::new(OpenAIProvider::new(openai)?)
        }
        AiProviderKind::Ollama => {
            let mut ollama = OllamaConfig::default().with_timeout(config.timeout());
            if let Some(model) = &config.model {
                ollama = ollama.with_model(model.clone());
            }
            if let Some(url) = &config.ollama_base_url {
                ollama = ollama.with_base_url(url.clone());
            }
            Arc::new(OllamaProvider::new(ollama)?)
        }
    };

    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "AI fallback enabled");
    Ok(FallbackResponder::new(provider, config.timeout()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
