//! Process wiring: explicit construction of stores, services, channels,
//! consumers, and the router.

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;

use storefront_backend::{
    CoreEntity, CoreEventProcessor, CoreService, ProductEntity, RecommendationEntity, ReviewEntity,
};
use storefront_channel::{
    ConsumerConfig, DeadLetterQueue, EventChannel, EventProcessor, Partition, PublishPool,
    spawn_consumer,
};
use storefront_composite::{CompositeIntegration, CompositeService};
use storefront_core::address::service_address;
use storefront_core::api::{Product, Recommendation, Review};
use storefront_core::clock::Clock;
use storefront_core::service::{ProductApi, RecommendationApi, ReviewApi};
use storefront_store::InMemoryStore;

use crate::config::AppConfig;
use crate::routes;
use crate::state::AppState;

/// A fully wired application: the router plus the background consumers and
/// their dead-letter queues.
pub struct Application {
    /// The HTTP router, without middleware layers.
    pub router: Router,
    /// One consumer task per channel partition. They end when the producer
    /// side is dropped.
    pub consumer_handles: Vec<JoinHandle<()>>,
    /// Dead-lettered product events.
    pub product_dead_letters: DeadLetterQueue<Product>,
    /// Dead-lettered recommendation events.
    pub recommendation_dead_letters: DeadLetterQueue<Recommendation>,
    /// Dead-lettered review events.
    pub review_dead_letters: DeadLetterQueue<Review>,
}

fn spawn_consumers<E: CoreEntity>(
    partitions: Vec<Partition<E::Api>>,
    service: &Arc<CoreService<E>>,
    consumer_config: ConsumerConfig,
    dead_letters: &DeadLetterQueue<E::Api>,
) -> Vec<JoinHandle<()>> {
    partitions
        .into_iter()
        .map(|partition| {
            let processor: Arc<dyn EventProcessor<E::Api>> =
                Arc::new(CoreEventProcessor::new(Arc::clone(service)));
            spawn_consumer(partition, processor, consumer_config, dead_letters.clone())
        })
        .collect()
}

/// Builds the whole process: one composite service and three core services
/// sharing a runtime, connected by in-process event channels.
///
/// Must be called from within a tokio runtime, since it spawns the consumer
/// tasks.
#[must_use]
pub fn build(config: &AppConfig, clock: Arc<dyn Clock>) -> Application {
    // Entity stores and core services.
    let products = Arc::new(CoreService::<ProductEntity>::new(
        Arc::new(InMemoryStore::new()),
        service_address("product", config.port),
    ));
    let recommendations = Arc::new(CoreService::<RecommendationEntity>::new(
        Arc::new(InMemoryStore::new()),
        service_address("recommendation", config.port),
    ));
    let reviews = Arc::new(CoreService::<ReviewEntity>::new(
        Arc::new(InMemoryStore::new()),
        service_address("review", config.port),
    ));

    // Event channels, one per entity type, partitioned by product key.
    let (product_events, product_partitions) =
        EventChannel::new("products", config.partitions, config.channel_buffer);
    let (recommendation_events, recommendation_partitions) =
        EventChannel::new("recommendations", config.partitions, config.channel_buffer);
    let (review_events, review_partitions) =
        EventChannel::new("reviews", config.partitions, config.channel_buffer);

    // Consumers, one per partition.
    let consumer_config = ConsumerConfig {
        max_redeliveries: config.max_redeliveries,
    };
    let product_dead_letters = DeadLetterQueue::new();
    let recommendation_dead_letters = DeadLetterQueue::new();
    let review_dead_letters = DeadLetterQueue::new();
    let mut consumer_handles = Vec::new();
    consumer_handles.extend(spawn_consumers(
        product_partitions,
        &products,
        consumer_config,
        &product_dead_letters,
    ));
    consumer_handles.extend(spawn_consumers(
        recommendation_partitions,
        &recommendations,
        consumer_config,
        &recommendation_dead_letters,
    ));
    consumer_handles.extend(spawn_consumers(
        review_partitions,
        &reviews,
        consumer_config,
        &review_dead_letters,
    ));

    // The aggregator and its publish pool.
    let integration = Arc::new(CompositeIntegration::new(
        Arc::clone(&products) as Arc<dyn ProductApi>,
        Arc::clone(&recommendations) as Arc<dyn RecommendationApi>,
        Arc::clone(&reviews) as Arc<dyn ReviewApi>,
        product_events,
        recommendation_events,
        review_events,
        Arc::new(PublishPool::new(
            config.publish_workers,
            config.publish_queue_depth,
        )),
        clock,
    ));
    let composite = Arc::new(CompositeService::new(
        integration,
        service_address("product-composite", config.port),
        config.read_timeout,
    ));

    let state = AppState::new(composite, products, recommendations, reviews);
    let router = Router::new()
        .merge(routes::health::router())
        .merge(routes::product_composite::router())
        .merge(routes::product::router())
        .merge(routes::recommendation::router())
        .merge(routes::review::router())
        .with_state(state);

    Application {
        router,
        consumer_handles,
        product_dead_letters,
        recommendation_dead_letters,
        review_dead_letters,
    }
}
