use clap::Parser;
use std::sync::Arc;
use tinychat::args::{Args, ProviderKind};
use tinychat::{
    ChatServer, CompletionProvider, EchoProvider, OllamaProvider, TurnController, config, logger,
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::try_init(args.log_level).map_err(|e| anyhow::anyhow!(e))?;

    let cfg = config::load(args.config.as_ref()).await?;
    let provider: Arc<dyn CompletionProvider> = match args.provider {
        ProviderKind::Ollama => {
            let llm = OllamaProvider::connect(&args.llm_url, &args.model, cfg.llm)?;
            tracing::info!(url = %args.llm_url, model = llm.model(), "using ollama");
            Arc::new(llm)
        }
        ProviderKind::Echo => {
            tracing::info!("using echo provider");
            Arc::new(EchoProvider)
        }
    };

    let chat = Arc::new(ChatServer::new(TurnController::new(provider)));
    server::serve(chat, args.socket_addr()?).await
}
