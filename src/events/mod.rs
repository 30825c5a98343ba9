use crate::models::product::Product;
use mediator::{DefaultMediator, Event, Mediator};

#[derive(Debug, Clone)]
pub struct ProductAddedEvent(pub Product);
impl Event for ProductAddedEvent {}

#[derive(Debug, Clone)]
pub struct ProductUpdatedEvent(pub Product);
impl Event for ProductUpdatedEvent {}

#[derive(Debug, Clone)]
pub struct ProductDeletedEvent(pub Product);
impl Event for ProductDeletedEvent {}

/// Publishes an event for a change that is already stored, so a failure is
/// only logged.
pub fn notify<E>(mediator: &mut DefaultMediator, event: E)
where
    E: Event + std::fmt::Debug + 'static,
{
    let description = format!("{:?}", event);
    if let Err(err) = mediator.publish(event) {
        log::warn!("Nobody received {}: {}", description, err);
    }
}
