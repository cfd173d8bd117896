//! Triage assistant server entry point.

use std::sync::Arc;
use std::time::Duration;

use secrecy::Secret;
use tracing_subscriber::EnvFilter;

use triage_assistant::adapters::ai::{
    FailoverTextGenerator, IamTokenProvider, WatsonxConfig as WatsonxClientConfig,
    WatsonxTextGenerator,
};
use triage_assistant::adapters::http::{
    create_router, ChatAppState, HttpServices, VoiceAppState, WhatsAppAppState,
};
use triage_assistant::adapters::media::{TwilioMediaFetcher, UnconfiguredMediaFetcher};
use triage_assistant::adapters::nlu::{DisabledNluAnalyzer, WatsonNluAnalyzer, WatsonNluConfig};
use triage_assistant::adapters::speech::{
    UnconfiguredSpeech, WatsonSpeechConfig, WatsonSttTranscriber, WatsonTtsSynthesizer,
};
use triage_assistant::adapters::{InMemoryConversationStore, SystemClock};
use triage_assistant::application::{
    AssessmentEngine, HandleInboundMessageHandler, IntentClassifier, ResetConversationHandler,
    SynthesizeSpeechHandler, TranscribeAudioHandler,
};
use triage_assistant::config::{AppConfig, ConfigError};
use triage_assistant::ports::{
    Clock, ConversationStore, MediaFetcher, NluAnalyzer, SpeechSynthesizer, TextGenerator,
    Transcriber,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    init_tracing(&config);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(
        InMemoryConversationStore::new()
            .with_clock(clock.clone())
            .with_ttl_secs(config.triage.conversation_ttl_secs)
            .with_max_messages(config.triage.max_messages),
    );

    let generator = build_generator(&config);
    let nlu = build_nlu(&config);
    let transcriber = build_transcriber(&config);
    let synthesizer = build_synthesizer(&config);
    let media = build_media_fetcher(&config);

    let engine = Arc::new(AssessmentEngine::new(
        generator,
        config
            .triage
            .engine_config(config.watsonx.generation_params()),
    ));
    let transcription = Arc::new(TranscribeAudioHandler::new(transcriber));
    let inbound = Arc::new(
        HandleInboundMessageHandler::new(
            store.clone(),
            clock.clone(),
            Arc::new(IntentClassifier::new(nlu)),
            engine,
            transcription.clone(),
            media,
        )
        .with_emergency_detector(config.triage.emergency_detector())
        .with_command_classifier(config.triage.command_classifier()),
    );

    let services = HttpServices {
        chat: ChatAppState::new(
            inbound.clone(),
            Arc::new(ResetConversationHandler::new(store.clone())),
        ),
        whatsapp: WhatsAppAppState::new(inbound),
        voice: VoiceAppState::new(
            Arc::new(SynthesizeSpeechHandler::new(synthesizer)),
            transcription,
        ),
    };
    let app = create_router(services, &config.server);

    spawn_sweeper(
        store,
        clock,
        Duration::from_secs(config.triage.sweep_interval_secs()),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Triage assistant listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_generator(config: &AppConfig) -> Arc<dyn TextGenerator> {
    let watsonx = &config.watsonx;
    let iam = Arc::new(IamTokenProvider::new(
        Secret::new(watsonx.api_key.clone()),
        watsonx.iam_url.clone(),
        watsonx.timeout(),
    ));
    let client_config = |model: &str| {
        WatsonxClientConfig::new(watsonx.project_id.clone())
            .with_model(model)
            .with_base_url(watsonx.url.clone())
            .with_timeout(watsonx.timeout())
            .with_max_retries(watsonx.max_retries)
    };

    let primary: Arc<dyn TextGenerator> = Arc::new(WatsonxTextGenerator::new(
        client_config(&watsonx.model_id),
        iam.clone(),
    ));

    match watsonx.fallback_model() {
        Some(fallback) => {
            tracing::info!(primary = %watsonx.model_id, %fallback, "Text generation with failover");
            Arc::new(
                FailoverTextGenerator::new(primary).with_fallback(Arc::new(
                    WatsonxTextGenerator::new(client_config(fallback), iam),
                )),
            )
        }
        None => primary,
    }
}

fn build_nlu(config: &AppConfig) -> Arc<dyn NluAnalyzer> {
    match config.nlu.credentials() {
        Some((api_key, url)) => Arc::new(WatsonNluAnalyzer::new(
            WatsonNluConfig::new(Secret::new(api_key.to_string()), url)
                .with_version(config.nlu.version.clone())
                .with_timeout(config.nlu.timeout()),
        )),
        None => {
            tracing::warn!("NLU not configured; intent classification degrades to defaults");
            Arc::new(DisabledNluAnalyzer)
        }
    }
}

fn build_transcriber(config: &AppConfig) -> Arc<dyn Transcriber> {
    match config.speech.stt_credentials() {
        Some((api_key, url)) => Arc::new(WatsonSttTranscriber::new(
            WatsonSpeechConfig::new(Secret::new(api_key.to_string()), url)
                .with_timeout(config.speech.timeout()),
        )),
        None => {
            tracing::warn!("Speech-to-text not configured");
            Arc::new(UnconfiguredSpeech)
        }
    }
}

fn build_synthesizer(config: &AppConfig) -> Arc<dyn SpeechSynthesizer> {
    match config.speech.tts_credentials() {
        Some((api_key, url)) => Arc::new(WatsonTtsSynthesizer::new(
            WatsonSpeechConfig::new(Secret::new(api_key.to_string()), url)
                .with_timeout(config.speech.timeout()),
        )),
        None => {
            tracing::warn!("Text-to-speech not configured");
            Arc::new(UnconfiguredSpeech)
        }
    }
}

fn build_media_fetcher(config: &AppConfig) -> Arc<dyn MediaFetcher> {
    match config.twilio.credentials() {
        Some((account_sid, auth_token)) => Arc::new(TwilioMediaFetcher::new(
            account_sid,
            Secret::new(auth_token.to_string()),
            config.speech.timeout(),
        )),
        None => Arc::new(UnconfiguredMediaFetcher),
    }
}

/// Drops expired conversations in the background, in addition to the
/// sweep each inbound message performs.
fn spawn_sweeper(store: Arc<InMemoryConversationStore>, clock: Arc<dyn Clock>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let removed = store.sweep(clock.now()).await;
            if removed > 0 {
                tracing::debug!(removed, "Swept expired conversations");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
