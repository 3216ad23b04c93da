//! Yquando server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use yquando::adapters::ai::{OpenAIConfig, OpenAIProvider};
use yquando::adapters::http::{app_router, WebhookAppState};
use yquando::adapters::messaging::{TwilioConfig, TwilioTransport};
use yquando::adapters::postgres::{
    connect_pool, run_migrations, PostgresConversationLog, PostgresProfileStore,
};
use yquando::application::HandleInboundMessageHandler;
use yquando::config::{AppConfig, LogFormat, ServerConfig};
use yquando::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let addr = config.server.socket_addr()?;
    tracing::info!(
        environment = ?config.server.environment,
        "Starting yquando"
    );

    let pool = connect_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let ai_provider = OpenAIProvider::new(
        OpenAIConfig::new(&config.ai.openai_api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;
    let provider = ai_provider.provider_info();
    tracing::info!(provider = %provider.name, model = %provider.model, "AI provider ready");

    let transport = TwilioTransport::new(
        TwilioConfig::new(
            &config.messaging.twilio_account_sid,
            &config.messaging.twilio_auth_token,
            &config.messaging.twilio_phone_number,
        )
        .with_base_url(&config.messaging.api_base_url),
    );

    let mut handler = HandleInboundMessageHandler::new(
        Arc::new(PostgresProfileStore::new(pool.clone())),
        Arc::new(PostgresConversationLog::new(pool)),
        Arc::new(ai_provider),
        Arc::new(transport),
    );
    if let Some(temperature) = config.ai.temperature {
        handler = handler.with_temperature(temperature);
    }
    if let Some(max_tokens) = config.ai.max_tokens {
        handler = handler.with_max_tokens(max_tokens);
    }

    let app = app_router(WebhookAppState::new(Arc::new(handler)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
