//! Consultant AI server.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use consultant_ai::adapters::ai::{GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider};
use consultant_ai::adapters::http::{build_router, AppState};
use consultant_ai::adapters::memory::{InMemoryPromptStore, InMemoryTrainingExampleStore};
use consultant_ai::adapters::postgres::{
    PostgresPromptStore, PostgresTrainingExampleStore, MIGRATOR,
};
use consultant_ai::application::{PromptManager, ReplyGenerator};
use consultant_ai::config::{AiConfig, AiProvider, AppConfig, ConfigError, DatabaseConfig};
use consultant_ai::ports::{AIProvider, PromptStore, TrainingExampleStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    let (prompt_store, training_examples) = build_stores(config.database.as_ref()).await?;
    let provider = build_provider(&config.ai)?;
    tracing::info!(
        provider = ?config.ai.provider,
        model = config.ai.model_name(),
        "AI provider configured"
    );

    let prompts = PromptManager::new(prompt_store);
    if config.features.seed_default_prompts {
        let seeded = prompts.ensure_defaults().await?;
        tracing::info!(seeded = seeded.len(), "default prompts checked");
    }

    let generator = ReplyGenerator::new(provider).with_temperature(config.ai.temperature);
    let state = AppState::new(prompts, generator, training_examples)
        .with_verbose_errors(config.features.verbose_errors);
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let fmt_layer = if config.is_production() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

async fn build_stores(
    database: Option<&DatabaseConfig>,
) -> Result<(Arc<dyn PromptStore>, Arc<dyn TrainingExampleStore>), BoxError> {
    let Some(database) = database else {
        tracing::warn!("no database configured; prompts and training examples are kept in memory");
        return Ok((
            Arc::new(InMemoryPromptStore::new()),
            Arc::new(InMemoryTrainingExampleStore::new()),
        ));
    };

    let pool = database.pool_options().connect(database.url()).await?;

    if database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    Ok((
        Arc::new(PostgresPromptStore::new(pool.clone())),
        Arc::new(PostgresTrainingExampleStore::new(pool)),
    ))
}

fn build_provider(ai: &AiConfig) -> Result<Arc<dyn AIProvider>, BoxError> {
    let key = ai
        .api_key()
        .map(|k| k.expose_secret().clone())
        .unwrap_or_default();

    let provider: Arc<dyn AIProvider> = match ai.provider {
        AiProvider::Gemini => Arc::new(GeminiProvider::new(
            GeminiConfig::new(key)
                .with_model(ai.model_name())
                .with_base_url(ai.base_url())
                .with_timeout(ai.timeout()),
        )?),
        AiProvider::OpenAI => Arc::new(OpenAIProvider::new(
            OpenAIConfig::new(key)
                .with_model(ai.model_name())
                .with_base_url(ai.base_url())
                .with_timeout(ai.timeout()),
        )?),
    };
    Ok(provider)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
