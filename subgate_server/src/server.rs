use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use subgate_engine::{
    events::{EventHandlers, EventProducers},
    ReconciliationApi,
    SqliteStore,
};
use telegram_tools::TelegramApi;

use crate::{
    config::ServerConfig,
    data_objects::ServerStartTime,
    errors::ServerError,
    notifier::notification_hooks,
    routes::{health, payment_status, test_webhook, webhook},
};

/// Upper bound on queued-but-undispatched notification events.
const EVENT_BUFFER_SIZE: usize = 16;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = SqliteStore::new_with_url(&config.database_url, config.db_pool_size)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let notifier = TelegramApi::new(config.telegram.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, notification_hooks(notifier));
    let producers = handlers.producers();
    handlers.start_handlers();
    let srv = create_server_instance(config, store, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    store: SqliteStore,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let start_time = web::Data::new(ServerStartTime::now());
    let srv = HttpServer::new(move || {
        let api = ReconciliationApi::new(store.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("subgate::access_log"))
            .wrap(Cors::permissive())
            .app_data(web::Data::new(api))
            .app_data(start_time.clone())
            .service(health)
            .service(web::resource("/webhook").route(web::route().to(webhook::<SqliteStore>)))
            .service(web::resource("/payment/{order_id}").route(web::get().to(payment_status::<SqliteStore>)))
            .service(web::resource("/test-webhook").route(web::post().to(test_webhook::<SqliteStore>)))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
