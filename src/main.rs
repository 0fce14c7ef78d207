use message_board_service::api;
use message_board_service::common::init;
use message_board_service::settings::AppSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::load_from_env()?;
    init::initialize_logging(&settings);
    api::serve(&settings).await
}
