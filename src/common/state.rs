use crate::common::context::Context;
use crate::repositories::messages::MessagesRepository;
use crate::settings::ServiceSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessagesRepository>,
    pub settings: ServiceSettings,
}

impl Context for AppState {
    fn messages(&self) -> &dyn MessagesRepository {
        self.messages.as_ref()
    }

    fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}
