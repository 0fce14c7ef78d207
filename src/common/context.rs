use crate::repositories::messages::MessagesRepository;
use crate::settings::ServiceSettings;

pub trait Context: Sync + Send {
    fn messages(&self) -> &dyn MessagesRepository;
    fn settings(&self) -> &ServiceSettings;
}
